use crate::lifecycle::ExecutionEngine;
use crate::lifecycle::adapters::{Custody, VenueAdapter};
use crate::types::{AccountId, Direction, Order, OrderKey, Timestamp};

/// Read-only projection of an order plus its time/amount derivations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OrderView {
    pub initiator: AccountId,
    pub direction: Direction,
    pub total_amount: u64,
    pub principal_consumed: u64,
    pub amount_bought: u64,
    pub amount_claimed: u64,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub last_execution_time: Timestamp,
    pub execution_interval: u64,
    pub total_intervals: u64,
    pub intervals_executed: u64,
    /// Seconds until the scheduled end, zero once past it.
    pub remaining_time: u64,
    /// Principal not yet sent to the venue.
    pub remaining_amount: u64,
}

pub fn order_view(order: &Order, now: Timestamp) -> OrderView {
    OrderView {
        initiator: order.initiator.clone(),
        direction: order.direction,
        total_amount: order.total_amount,
        principal_consumed: order.principal_consumed,
        amount_bought: order.amount_bought,
        amount_claimed: order.amount_claimed,
        start_time: order.start_time,
        end_time: order.end_time,
        last_execution_time: order.last_execution_time,
        execution_interval: order.execution_interval,
        total_intervals: order.total_intervals,
        intervals_executed: order.intervals_executed,
        remaining_time: order.end_time.saturating_sub(now),
        remaining_amount: order.remaining_principal(),
    }
}

/// Percentage of intervals executed, floored. Zero for an inactive order.
pub fn progress_percent(order: &Order) -> u64 {
    if !order.is_active() || order.total_intervals == 0 {
        return 0;
    }
    100 * order.intervals_executed / order.total_intervals
}

impl<C: Custody, V: VenueAdapter> ExecutionEngine<C, V> {
    /// Snapshot of the active order at `key`, if any.
    pub fn get_order(&self, key: &OrderKey, now: Timestamp) -> Option<OrderView> {
        self.store()
            .get(key)
            .filter(Order::is_active)
            .map(|order| order_view(&order, now))
    }

    pub fn get_progress_percent(&self, key: &OrderKey) -> u64 {
        self.store()
            .get(key)
            .map_or(0, |order| progress_percent(&order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountId;

    fn sample_order() -> Order {
        Order {
            initiator: AccountId::from("alice"),
            direction: Direction::BToA,
            total_amount: 1000,
            principal_consumed: 200,
            amount_bought: 190,
            amount_claimed: 50,
            start_time: 100,
            end_time: 1100,
            last_execution_time: 300,
            execution_interval: 100,
            total_intervals: 10,
            intervals_executed: 2,
        }
    }

    #[test]
    fn view_derives_remaining_fields() {
        let view = order_view(&sample_order(), 400);
        assert_eq!(view.remaining_time, 700);
        assert_eq!(view.remaining_amount, 800);
    }

    #[test]
    fn remaining_time_floors_at_zero_past_end() {
        let view = order_view(&sample_order(), 5000);
        assert_eq!(view.remaining_time, 0);
    }

    #[test]
    fn progress_is_floored_interval_ratio() {
        let mut order = sample_order();
        assert_eq!(progress_percent(&order), 20);
        order.intervals_executed = 3;
        order.total_intervals = 7;
        assert_eq!(progress_percent(&order), 42);
    }

    #[test]
    fn progress_of_inactive_order_is_zero() {
        assert_eq!(progress_percent(&Order::default()), 0);
    }
}
