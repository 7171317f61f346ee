use crate::types::AccountId;

/// Default ceiling on order duration: 30 days.
pub const DEFAULT_MAX_ALLOWED_DURATION_SECS: u64 = 30 * 24 * 60 * 60;

/// Parameters owned by the administrative collaborator.
///
/// The core reads `max_allowed_duration` as a precondition input; the
/// treasury address is carried for the surrounding fee collector and is not
/// consulted by any lifecycle path.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdminParams {
    /// Longest allowed span between an order's start and end times, seconds.
    pub max_allowed_duration: u64,
    /// Destination for venue fees, managed outside the core.
    pub treasury: AccountId,
}

impl Default for AdminParams {
    fn default() -> Self {
        Self {
            max_allowed_duration: DEFAULT_MAX_ALLOWED_DURATION_SECS,
            treasury: AccountId::default(),
        }
    }
}
