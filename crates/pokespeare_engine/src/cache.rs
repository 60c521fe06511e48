use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OnceCell;

use crate::CreatureRecord;

type Slot = Arc<OnceCell<CreatureRecord>>;

/// Name-keyed record cache with single-flight population.
///
/// Concurrent misses on one key share a single fetch; the others wait for it.
/// A failed fetch leaves the slot empty so the next caller tries again.
#[derive(Debug, Default)]
pub struct RecordCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached record for `name`, if a fetch for it has completed.
    pub fn get(&self, name: &str) -> Option<CreatureRecord> {
        self.lock()
            .get(&cache_key(name))
            .and_then(|slot| slot.get().cloned())
    }

    /// Forgets `name`. Returns whether a record was cached.
    pub fn invalidate(&self, name: &str) -> bool {
        self.lock()
            .remove(&cache_key(name))
            .is_some_and(|slot| slot.initialized())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of populated records.
    pub fn len(&self) -> usize {
        self.lock().values().filter(|slot| slot.initialized()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) async fn get_or_fetch<F, Fut, E>(
        &self,
        name: &str,
        fetch: F,
    ) -> Result<CreatureRecord, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CreatureRecord, E>>,
    {
        let key = cache_key(name);
        let slot = self.slot(&key);
        match slot.get_or_try_init(fetch).await {
            Ok(record) => Ok(record.clone()),
            Err(err) => {
                self.discard_empty(&key, &slot);
                Err(err)
            }
        }
    }

    fn slot(&self, key: &str) -> Slot {
        self.lock().entry(key.to_string()).or_default().clone()
    }

    /// Drops `slot` after a failed fetch unless it was replaced or filled meanwhile.
    fn discard_empty(&self, key: &str, slot: &Slot) {
        let mut slots = self.lock();
        let stale = slots
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && !current.initialized());
        if stale {
            slots.remove(key);
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // Slots are only ever inserted or removed whole, so a poisoned map is still consistent.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) fn cache_key(name: &str) -> String {
    name.trim().to_lowercase()
}
