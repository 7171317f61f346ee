#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("duration {duration}s exceeds maximum allowed {max}s")]
    DurationExceedsMaximum { duration: u64, max: u64 },

    #[error("execution interval {interval}s does not divide duration {duration}s")]
    IntervalDoesNotDivideDuration { interval: u64, duration: u64 },

    #[error("end time {end_time} is in the past (now {now})")]
    EndTimeInPast { end_time: u64, now: u64 },

    #[error("an order is already in progress for key {key}")]
    ExistingOrderInProgress { key: String },

    #[error("no active order for key {key}")]
    OrderNotFound { key: String },

    #[error("caller {caller} is not the order initiator")]
    UnauthorizedCaller { caller: String },

    #[error("no proceeds to claim")]
    NoProceedsToClaim,

    #[error("order principal must be non-zero")]
    ZeroPrincipal,

    #[error("execution interval must be non-zero")]
    ZeroExecutionInterval,

    #[error("order duration must be non-zero")]
    ZeroDuration,

    #[error("custody transfer failed: {reason}")]
    Custody { reason: String },

    #[error("venue swap failed: {reason}")]
    Venue { reason: String },
}
