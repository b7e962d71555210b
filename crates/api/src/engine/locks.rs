//! Per-(user, category) calculation locks.
//!
//! The guard's check-then-act (read the last calculation, decide, write a
//! new row) is only safe when at most one calculation runs per key at a
//! time. Handlers hold the key's lock across guard evaluation and the
//! history write.

use std::collections::HashMap;
use std::sync::Arc;

use skillgauge_core::types::DbId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lock map keyed by (user id, category id).
#[derive(Default)]
pub struct CalculationLocks {
    inner: Mutex<HashMap<(DbId, DbId), Arc<Mutex<()>>>>,
}

impl CalculationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one key, waiting if another calculation for
    /// the same key is in flight.
    ///
    /// Entries are retained for the process lifetime; the key space is
    /// bounded by active (user, category) pairs.
    pub async fn acquire(&self, user_id: DbId, category_id: DbId) -> OwnedMutexGuard<()> {
        let entry = {
            let mut map = self.inner.lock().await;
            Arc::clone(
                map.entry((user_id, category_id))
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        entry.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_key_is_exclusive() {
        let locks = Arc::new(CalculationLocks::new());
        let guard = locks.acquire(1, 2).await;

        let locks2 = Arc::clone(&locks);
        let contender = tokio::spawn(async move {
            let _guard = locks2.acquire(1, 2).await;
        });

        // The contender cannot finish while the guard is held.
        tokio::task::yield_now().await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn different_keys_do_not_contend() {
        let locks = CalculationLocks::new();
        let _a = locks.acquire(1, 2).await;
        // Must not deadlock.
        let _b = locks.acquire(1, 3).await;
        let _c = locks.acquire(2, 2).await;
    }
}
