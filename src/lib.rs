#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod accounting;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod query;
pub mod store;
pub mod types;

pub use accounting::{DueExecution, compute_due};
pub use config::{AdminParams, DEFAULT_MAX_ALLOWED_DURATION_SECS};
pub use error::Error;
pub use lifecycle::adapters::{Custody, SwapReceipt, VenueAdapter};
pub use lifecycle::trigger::TriggerOutcome;
pub use lifecycle::{CancelSettlement, ExecutedSlice, ExecutionEngine};
pub use query::{OrderView, order_view, progress_percent};
pub use store::OrderStore;
pub use types::{AccountId, Direction, Order, OrderKey, PairAsset, Timestamp};
