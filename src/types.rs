use std::fmt;

/// Second-resolution wall-clock time, supplied by the caller on every
/// time-dependent operation. The engine reads no ambient clock.
pub type Timestamp = u64;

/// Execution key: identifies the market/pool an order runs against.
/// At most one active order exists per key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct OrderKey(pub String);

impl OrderKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Account identity. The order's initiator is the only identity allowed to
/// amend, cancel, or claim it; the engine's own identity short-circuits the
/// market-activity trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One side of the execution key's trading pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PairAsset {
    A,
    B,
}

/// Which asset of the pair is sold for which.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    #[default]
    AToB,
    BToA,
}

impl Direction {
    /// Asset the principal is denominated in.
    pub fn input_asset(self) -> PairAsset {
        match self {
            Self::AToB => PairAsset::A,
            Self::BToA => PairAsset::B,
        }
    }

    /// Asset the proceeds are denominated in.
    pub fn output_asset(self) -> PairAsset {
        match self {
            Self::AToB => PairAsset::B,
            Self::BToA => PairAsset::A,
        }
    }
}

/// A single time-sliced execution order.
///
/// The default record is the "empty" state a key holds before an order is
/// initiated and after one is fully settled; `total_amount != 0` marks the
/// record active.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Order {
    /// Account permitted to amend, cancel, and claim.
    pub initiator: AccountId,
    /// Which asset is sold for which.
    pub direction: Direction,
    /// Total principal committed to be sold over the order's life.
    pub total_amount: u64,
    /// Cumulative principal already sent to the venue.
    pub principal_consumed: u64,
    /// Cumulative proceeds received from executed intervals.
    pub amount_bought: u64,
    /// Cumulative proceeds already withdrawn by the initiator.
    pub amount_claimed: u64,
    /// Activation time.
    pub start_time: Timestamp,
    /// Scheduled completion time.
    pub end_time: Timestamp,
    /// Checkpoint of the last interval boundary executed. Always
    /// interval-aligned relative to `start_time`.
    pub last_execution_time: Timestamp,
    /// Granularity of partial execution, in seconds. Non-zero while active.
    pub execution_interval: u64,
    /// `(end_time - start_time) / execution_interval`.
    pub total_intervals: u64,
    /// Count of intervals already processed.
    pub intervals_executed: u64,
}

impl Order {
    pub fn is_active(&self) -> bool {
        self.total_amount != 0
    }

    /// All committed principal has been sent to the venue. The record stays
    /// active until the initiator drains it with a claim.
    pub fn is_complete(&self) -> bool {
        self.is_active() && self.principal_consumed == self.total_amount
    }

    /// Fixed per-interval slice of the principal. Never re-derived
    /// proportionally from elapsed time, so repeated rounding cannot drift.
    pub fn amount_per_interval(&self) -> u64 {
        if self.total_intervals == 0 {
            0
        } else {
            self.total_amount / self.total_intervals
        }
    }

    /// Principal not yet sent to the venue.
    pub fn remaining_principal(&self) -> u64 {
        self.total_amount.saturating_sub(self.principal_consumed)
    }

    /// Proceeds accrued but not yet withdrawn.
    pub fn claimable_proceeds(&self) -> u64 {
        self.amount_bought.saturating_sub(self.amount_claimed)
    }
}
