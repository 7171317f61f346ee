use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::error::Error;
use crate::types::{Order, OrderKey};

/// Keyed store holding at most one order per execution key.
///
/// Each key owns a slot guarded by its own mutex: every lifecycle operation
/// runs start-to-finish under that lock, so calls against one key are
/// serialized while distinct keys proceed concurrently. Slots hold the
/// default (empty) record when no order is active.
#[derive(Default)]
pub struct OrderStore {
    slots: DashMap<OrderKey, Arc<Mutex<Order>>>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &OrderKey) -> Arc<Mutex<Order>> {
        self.slots.entry(key.clone()).or_default().clone()
    }

    /// Snapshot of the order at `key`, if the key has ever been touched.
    pub fn get(&self, key: &OrderKey) -> Option<Order> {
        self.slots.get(key).map(|slot| slot.lock().clone())
    }

    /// Store `order` at `key`. Writing an active record over an existing
    /// active one fails; writing the empty record always succeeds.
    pub fn put(&self, key: &OrderKey, order: Order) -> Result<(), Error> {
        self.update(key, |current| {
            if current.is_active() && order.is_active() {
                return Err(Error::ExistingOrderInProgress {
                    key: key.to_string(),
                });
            }
            *current = order;
            Ok(())
        })
    }

    /// Atomic read-modify-write of the order at `key`.
    ///
    /// `f` runs under the per-key lock against a draft copy; the draft is
    /// persisted only when `f` returns `Ok`, so a failing operation leaves
    /// the stored record untouched.
    pub fn update<T>(
        &self,
        key: &OrderKey,
        f: impl FnOnce(&mut Order) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let slot = self.slot(key);
        let mut stored = slot.lock();
        let mut draft = stored.clone();
        let out = f(&mut draft)?;
        *stored = draft;
        Ok(out)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;
    use crate::types::AccountId;

    fn active_order(initiator: &str) -> Order {
        Order {
            initiator: AccountId::from(initiator),
            total_amount: 1000,
            end_time: 1000,
            execution_interval: 100,
            total_intervals: 10,
            ..Order::default()
        }
    }

    #[test]
    fn get_of_untouched_key_is_none() {
        let store = OrderStore::new();
        assert_eq!(store.get(&OrderKey::from("pool-1")), None);
    }

    #[test]
    fn put_rejects_second_active_order() {
        let store = OrderStore::new();
        let key = OrderKey::from("pool-1");
        store.put(&key, active_order("alice")).unwrap();

        let err = store.put(&key, active_order("bob")).unwrap_err();
        assert!(matches!(err, Error::ExistingOrderInProgress { .. }));
        assert_eq!(
            store.get(&key).unwrap().initiator,
            AccountId::from("alice")
        );
    }

    #[test]
    fn put_of_empty_record_resets_key() {
        let store = OrderStore::new();
        let key = OrderKey::from("pool-1");
        store.put(&key, active_order("alice")).unwrap();
        store.put(&key, Order::default()).unwrap();
        assert!(!store.get(&key).unwrap().is_active());

        // Key is reusable after the reset.
        store.put(&key, active_order("bob")).unwrap();
    }

    #[test]
    fn failed_update_leaves_record_untouched() {
        let store = OrderStore::new();
        let key = OrderKey::from("pool-1");
        store.put(&key, active_order("alice")).unwrap();

        let result: Result<(), Error> = store.update(&key, |order| {
            order.amount_bought = 999;
            order.total_amount = 0;
            Err(Error::NoProceedsToClaim)
        });
        assert!(result.is_err());

        let order = store.get(&key).unwrap();
        assert_eq!(order.amount_bought, 0);
        assert_eq!(order.total_amount, 1000);
    }

    #[test]
    fn keys_are_independent() {
        let store = OrderStore::new();
        store.put(&OrderKey::from("pool-1"), active_order("alice")).unwrap();
        store.put(&OrderKey::from("pool-2"), active_order("bob")).unwrap();

        store
            .update(&OrderKey::from("pool-1"), |order| {
                order.amount_bought = 42;
                Ok(())
            })
            .unwrap();

        assert_eq!(store.get(&OrderKey::from("pool-1")).unwrap().amount_bought, 42);
        assert_eq!(store.get(&OrderKey::from("pool-2")).unwrap().amount_bought, 0);
    }

    #[test]
    fn concurrent_updates_on_one_key_serialize() {
        let store = Arc::new(OrderStore::new());
        let key = OrderKey::from("pool-1");
        store.put(&key, active_order("alice")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let key = key.clone();
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        store
                            .update(&key, |order| {
                                order.amount_bought += 1;
                                Ok(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(&key).unwrap().amount_bought, 8000);
    }
}
