//! Store Module - keyed watcher registry
//!
//! Key types:
//! - `Store`: the registry contract (put/get/exists/remove/size/get_all/clear)
//! - `DefaultStore`: HashMap-backed, not safe for concurrent access
//! - `ConcurrentStore`: DashMap-backed, clones share one map
//!
//! Watchers are held as `Arc<W>` handles and handed back unchanged.
//! A blank key (empty or whitespace-only) is never stored: `put` ignores it,
//! lookups treat it as absent. Validation trims, storage does not, so
//! `" job "` and `"job"` are two different keys.

use std::sync::Arc;

mod concurrent_store;
mod default_store;

pub use concurrent_store::ConcurrentStore;
pub use default_store::DefaultStore;

/// Basic operations for storing and managing policy watchers.
///
/// None of the operations fail. Invalid input resolves to a no-op,
/// `false` or `None`.
pub trait Store<W> {
    /// Register `watcher` under `key`, replacing any previous entry.
    /// Blank keys are ignored.
    fn put(&mut self, key: &str, watcher: Arc<W>);

    /// Like [`Store::put`], but an absent watcher is ignored.
    fn put_optional(&mut self, key: &str, watcher: Option<Arc<W>>) {
        match watcher {
            Some(watcher) => self.put(key, watcher),
            None => tracing::debug!(key, reason = "absent watcher", "put ignored"),
        }
    }

    /// Watcher registered under `key`.
    fn get(&self, key: &str) -> Option<Arc<W>>;

    /// Whether `key` is registered. Always `false` for a blank key.
    fn exists(&self, key: &str) -> bool;

    /// Remove the entry for `key` and return its watcher.
    fn remove(&mut self, key: &str) -> Option<Arc<W>>;

    /// Number of registered entries.
    fn size(&self) -> usize;

    /// Snapshot of every registered watcher, in no particular order.
    fn get_all(&self) -> Vec<Arc<W>>;

    /// Drop every entry.
    fn clear(&mut self);
}

/// Empty or whitespace-only keys are never stored.
#[inline]
pub fn is_blank(key: &str) -> bool {
    key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n "));
        assert!(!is_blank("job-1"));
        assert!(!is_blank("  job-1  "));
    }

    #[test]
    fn put_optional_none_is_ignored() {
        let mut store: DefaultStore<u32> = DefaultStore::new();
        store.put_optional("job-1", None);

        assert_eq!(store.size(), 0);
        assert!(!store.exists("job-1"));
    }

    #[test]
    fn put_optional_some_registers() {
        let mut store: DefaultStore<u32> = DefaultStore::new();
        let w = Arc::new(7);
        store.put_optional("job-1", Some(Arc::clone(&w)));

        assert!(Arc::ptr_eq(&store.get("job-1").unwrap(), &w));
    }

    #[test]
    fn trait_object_dispatch() {
        let mut stores: Vec<Box<dyn Store<u32>>> = vec![
            Box::new(DefaultStore::<u32>::new()),
            Box::new(ConcurrentStore::<u32>::new()),
        ];

        for store in &mut stores {
            store.put("a", Arc::new(1));
            store.put("b", Arc::new(2));
            assert_eq!(store.size(), 2);
            assert_eq!(store.remove("a").as_deref(), Some(&1));
            assert_eq!(store.size(), 1);
        }
    }
}
