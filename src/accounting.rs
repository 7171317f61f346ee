use crate::types::{Order, Timestamp};

/// Result of asking how much of an order is due at `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueExecution {
    /// Whole intervals elapsed since the last checkpoint, clamped to the
    /// intervals the order still has left.
    pub intervals_passed: u64,
    /// Principal due for execution, clamped to the remaining principal.
    pub amount_due: u64,
    /// Checkpoint after executing `intervals_passed` intervals. Always an
    /// interval boundary, never `now` itself.
    pub new_checkpoint: Timestamp,
}

impl DueExecution {
    fn none(order: &Order) -> Self {
        Self {
            intervals_passed: 0,
            amount_due: 0,
            new_checkpoint: order.last_execution_time,
        }
    }
}

/// Compute how much of `order` is due for execution at `now`.
///
/// The checkpoint advances by whole intervals only, so two calls inside the
/// same interval yield zero additional due amount: the function is idempotent
/// between interval boundaries. `amount_due` uses the order's fixed
/// per-interval slice and is clamped so the principal ever sent to the venue
/// cannot exceed `total_amount`.
pub fn compute_due(order: &Order, now: Timestamp) -> DueExecution {
    if !order.is_active() || order.execution_interval == 0 || now < order.last_execution_time {
        return DueExecution::none(order);
    }

    let elapsed = now - order.last_execution_time;
    let intervals_passed = (elapsed / order.execution_interval)
        .min(order.total_intervals.saturating_sub(order.intervals_executed));
    if intervals_passed == 0 {
        return DueExecution::none(order);
    }

    let amount_due = order
        .amount_per_interval()
        .saturating_mul(intervals_passed)
        .min(order.remaining_principal());

    DueExecution {
        intervals_passed,
        amount_due,
        new_checkpoint: order.last_execution_time + intervals_passed * order.execution_interval,
    }
}
