pub mod adapters;
pub mod trigger;

use parking_lot::RwLock;
use tracing::debug;

use crate::accounting;
use crate::config::AdminParams;
use crate::error::Error;
use crate::lifecycle::adapters::{Custody, VenueAdapter};
use crate::store::OrderStore;
use crate::types::{AccountId, Direction, Order, OrderKey, Timestamp};

/// One executed catch-up slice: the venue swap covering every interval that
/// was due at the time of the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutedSlice {
    pub intervals_passed: u64,
    pub principal_sold: u64,
    pub proceeds_received: u64,
}

/// Funds returned to the initiator by a cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelSettlement {
    pub refunded_principal: u64,
    pub proceeds_transferred: u64,
}

/// Order lifecycle engine: the only writer of committed-principal and
/// claimed-proceeds state.
///
/// Every operation runs inside the store's per-key atomic update, with the
/// custody and venue calls issued from within it: a collaborator failure
/// discards the draft record, so an operation either fully applies or fully
/// fails.
pub struct ExecutionEngine<C: Custody, V: VenueAdapter> {
    identity: AccountId,
    store: OrderStore,
    params: RwLock<AdminParams>,
    custody: C,
    venue: V,
}

impl<C: Custody, V: VenueAdapter> ExecutionEngine<C, V> {
    pub fn new(identity: AccountId, params: AdminParams, custody: C, venue: V) -> Self {
        Self {
            identity,
            store: OrderStore::new(),
            params: RwLock::new(params),
            custody,
            venue,
        }
    }

    /// Identity under which the engine issues venue swaps; market activity
    /// attributed to it is ignored by the trigger.
    pub fn identity(&self) -> &AccountId {
        &self.identity
    }

    pub fn admin_params(&self) -> AdminParams {
        self.params.read().clone()
    }

    pub fn set_max_allowed_duration(&self, value: u64) {
        self.params.write().max_allowed_duration = value;
    }

    pub fn set_treasury(&self, treasury: AccountId) {
        self.params.write().treasury = treasury;
    }

    pub(crate) fn store(&self) -> &OrderStore {
        &self.store
    }

    /// Commit `total_amount` of the direction's input asset to be sold in
    /// uniform slices over `duration` seconds.
    pub fn initiate(
        &self,
        key: &OrderKey,
        initiator: &AccountId,
        total_amount: u64,
        duration: u64,
        execution_interval: u64,
        direction: Direction,
        now: Timestamp,
    ) -> Result<(), Error> {
        if total_amount == 0 {
            return Err(Error::ZeroPrincipal);
        }
        if execution_interval == 0 {
            return Err(Error::ZeroExecutionInterval);
        }
        if duration == 0 {
            return Err(Error::ZeroDuration);
        }
        if duration % execution_interval != 0 {
            return Err(Error::IntervalDoesNotDivideDuration {
                interval: execution_interval,
                duration,
            });
        }
        let max = self.params.read().max_allowed_duration;
        if duration > max {
            return Err(Error::DurationExceedsMaximum { duration, max });
        }

        self.store.update(key, |order| {
            if order.is_active() {
                return Err(Error::ExistingOrderInProgress {
                    key: key.to_string(),
                });
            }
            self.custody
                .transfer_in(key, direction.input_asset(), initiator, total_amount)?;
            *order = Order {
                initiator: initiator.clone(),
                direction,
                total_amount,
                start_time: now,
                end_time: now + duration,
                last_execution_time: now,
                execution_interval,
                total_intervals: duration / execution_interval,
                ..Order::default()
            };
            debug!(
                key = %key,
                initiator = %initiator,
                total_amount,
                duration,
                execution_interval,
                direction = %direction,
                "order initiated"
            );
            Ok(())
        })
    }

    /// Replace the remaining principal and schedule of an active order.
    ///
    /// Intervals already due under the old schedule execute first, so no
    /// partial progress is lost; the principal delta is then settled with
    /// custody and the schedule re-anchored at `now`.
    pub fn amend(
        &self,
        key: &OrderKey,
        caller: &AccountId,
        new_total_amount: u64,
        new_end_time: Timestamp,
        now: Timestamp,
    ) -> Result<(), Error> {
        let max = self.params.read().max_allowed_duration;

        self.store.update(key, |order| {
            if !order.is_active() {
                return Err(Error::OrderNotFound {
                    key: key.to_string(),
                });
            }
            if order.initiator != *caller {
                return Err(Error::UnauthorizedCaller {
                    caller: caller.to_string(),
                });
            }
            if new_end_time < now {
                return Err(Error::EndTimeInPast {
                    end_time: new_end_time,
                    now,
                });
            }
            let new_duration = new_end_time - now;
            if new_duration == 0 {
                return Err(Error::ZeroDuration);
            }
            if new_duration > max {
                return Err(Error::DurationExceedsMaximum {
                    duration: new_duration,
                    max,
                });
            }
            if new_duration % order.execution_interval != 0 {
                return Err(Error::IntervalDoesNotDivideDuration {
                    interval: order.execution_interval,
                    duration: new_duration,
                });
            }
            if new_total_amount == 0 {
                return Err(Error::ZeroPrincipal);
            }

            self.execute_due(key, order, now)?;

            let remaining = order.remaining_principal();
            let input = order.direction.input_asset();
            if new_total_amount > remaining {
                self.custody.transfer_in(
                    key,
                    input,
                    &order.initiator,
                    new_total_amount - remaining,
                )?;
            } else if new_total_amount < remaining {
                self.custody.transfer_out(
                    key,
                    input,
                    &order.initiator,
                    remaining - new_total_amount,
                )?;
            }

            order.total_amount = new_total_amount;
            order.principal_consumed = 0;
            order.start_time = now;
            order.end_time = new_end_time;
            order.last_execution_time = now;
            order.intervals_executed = 0;
            order.total_intervals = new_duration / order.execution_interval;
            debug!(
                key = %key,
                new_total_amount,
                new_end_time,
                total_intervals = order.total_intervals,
                "order amended"
            );
            Ok(())
        })
    }

    /// Tear down an active order: catch up due intervals, refund the unused
    /// principal, pay out unclaimed proceeds, and release the key.
    pub fn cancel(
        &self,
        key: &OrderKey,
        caller: &AccountId,
        now: Timestamp,
    ) -> Result<CancelSettlement, Error> {
        self.store.update(key, |order| {
            if !order.is_active() {
                return Err(Error::OrderNotFound {
                    key: key.to_string(),
                });
            }
            if order.initiator != *caller {
                return Err(Error::UnauthorizedCaller {
                    caller: caller.to_string(),
                });
            }

            self.execute_due(key, order, now)?;

            let refund = order.remaining_principal();
            let proceeds = order.claimable_proceeds();
            if refund > 0 {
                self.custody.transfer_out(
                    key,
                    order.direction.input_asset(),
                    &order.initiator,
                    refund,
                )?;
            }
            if proceeds > 0 {
                self.custody.transfer_out(
                    key,
                    order.direction.output_asset(),
                    &order.initiator,
                    proceeds,
                )?;
            }
            debug!(
                key = %key,
                refunded_principal = refund,
                proceeds_transferred = proceeds,
                "order cancelled"
            );
            *order = Order::default();
            Ok(CancelSettlement {
                refunded_principal: refund,
                proceeds_transferred: proceeds,
            })
        })
    }

    /// Withdraw proceeds accrued so far. Returns the amount transferred.
    ///
    /// An in-progress order survives the claim and keeps accruing; a claim
    /// that drains a fully-executed order releases its key.
    pub fn claim(&self, key: &OrderKey, caller: &AccountId) -> Result<u64, Error> {
        self.store.update(key, |order| {
            if !order.is_active() {
                return Err(Error::OrderNotFound {
                    key: key.to_string(),
                });
            }
            if order.initiator != *caller {
                return Err(Error::UnauthorizedCaller {
                    caller: caller.to_string(),
                });
            }
            let claimable = order.claimable_proceeds();
            if claimable == 0 {
                return Err(Error::NoProceedsToClaim);
            }
            self.custody.transfer_out(
                key,
                order.direction.output_asset(),
                &order.initiator,
                claimable,
            )?;
            order.amount_claimed = order.amount_bought;
            debug!(key = %key, claimed = claimable, "proceeds claimed");
            if order.is_complete() {
                debug!(key = %key, "completed order drained, key released");
                *order = Order::default();
            }
            Ok(claimable)
        })
    }

    /// Execute every interval due at `now` through one venue swap and fold
    /// the result into `order`. `Ok(None)` when nothing is due.
    fn execute_due(
        &self,
        key: &OrderKey,
        order: &mut Order,
        now: Timestamp,
    ) -> Result<Option<ExecutedSlice>, Error> {
        let due = accounting::compute_due(order, now);
        if due.amount_due == 0 {
            return Ok(None);
        }

        let receipt = self.venue.swap(key, order.direction, due.amount_due)?;
        order.principal_consumed += due.amount_due;
        order.amount_bought += receipt.amount_received;
        order.intervals_executed += due.intervals_passed;
        order.last_execution_time = due.new_checkpoint;
        debug!(
            key = %key,
            intervals = due.intervals_passed,
            principal_sold = due.amount_due,
            proceeds_received = receipt.amount_received,
            checkpoint = due.new_checkpoint,
            "executed due intervals"
        );
        Ok(Some(ExecutedSlice {
            intervals_passed: due.intervals_passed,
            principal_sold: due.amount_due,
            proceeds_received: receipt.amount_received,
        }))
    }
}
