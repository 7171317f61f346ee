use tracing::debug;

use crate::error::Error;
use crate::lifecycle::ExecutionEngine;
use crate::lifecycle::adapters::{Custody, VenueAdapter};
use crate::types::{AccountId, OrderKey, Timestamp};

/// Observable result of one market-activity notification.
///
/// Orders sit in one of two logical states between boundaries:
/// idle-within-interval (nothing due yet) and due-for-execution. The
/// remaining variants are the short-circuit paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The activity was the engine's own venue swap; ignored.
    SelfTriggered,
    /// The key holds no active order.
    NoActiveOrder,
    /// All principal already consumed; nothing left to execute.
    AlreadyComplete,
    /// Inside the current interval; no state was touched.
    IdleWithinInterval,
    /// One or more due intervals were executed through the venue.
    Executed {
        intervals_passed: u64,
        principal_sold: u64,
        proceeds_received: u64,
    },
}

impl<C: Custody, V: VenueAdapter> ExecutionEngine<C, V> {
    /// Entry point for each external market-activity event on `key`.
    ///
    /// `actor` is the identity that originated the activity. The engine's
    /// own identity returns immediately, before any lock is taken: the venue
    /// swap issued below would otherwise re-enter this path.
    pub fn on_market_activity(
        &self,
        actor: &AccountId,
        key: &OrderKey,
        now: Timestamp,
    ) -> Result<TriggerOutcome, Error> {
        if actor == self.identity() {
            debug!(key = %key, "self-triggered activity ignored");
            return Ok(TriggerOutcome::SelfTriggered);
        }

        self.store().update(key, |order| {
            if !order.is_active() {
                return Ok(TriggerOutcome::NoActiveOrder);
            }
            if order.is_complete() {
                return Ok(TriggerOutcome::AlreadyComplete);
            }
            match self.execute_due(key, order, now)? {
                None => Ok(TriggerOutcome::IdleWithinInterval),
                Some(slice) => Ok(TriggerOutcome::Executed {
                    intervals_passed: slice.intervals_passed,
                    principal_sold: slice.principal_sold,
                    proceeds_received: slice.proceeds_received,
                }),
            }
        })
    }
}
