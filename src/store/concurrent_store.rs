//! ConcurrentStore - watcher registry with DashMap
//!
//! Same contract as `DefaultStore`, but safe to share between threads.
//! Clones share one map: hand each thread its own clone.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::{is_blank, Store};

/// Thread-safe watcher registry (lock-free reads)
pub struct ConcurrentStore<W> {
    /// key → watcher
    data: Arc<DashMap<String, Arc<W>>>,
}

impl<W> ConcurrentStore<W> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    /// Pre-allocate room for `capacity` watchers
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Arc::new(DashMap::with_capacity(capacity)),
        }
    }

    /// Register a watcher through a shared reference
    pub fn insert(&self, key: &str, watcher: Arc<W>) {
        if is_blank(key) {
            debug!(key, reason = "blank key", "put ignored");
            return;
        }

        let replaced = self.data.insert(key.to_string(), watcher).is_some();
        debug!(key, replaced, "watcher registered");
    }

    /// Remove a watcher through a shared reference
    pub fn take(&self, key: &str) -> Option<Arc<W>> {
        if is_blank(key) {
            return None;
        }

        let removed = self.data.remove(key).map(|(_, w)| w);
        debug!(key, hit = removed.is_some(), "watcher removed");
        removed
    }

    /// Drop every entry through a shared reference
    pub fn clear_all(&self) {
        if self.data.is_empty() {
            return;
        }

        debug!(dropped = self.data.len(), "store cleared");
        self.data.clear();
    }
}

// Derived Clone would require W: Clone
impl<W> Clone for ConcurrentStore<W> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<W> Default for ConcurrentStore<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> fmt::Debug for ConcurrentStore<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentStore")
            .field("size", &self.data.len())
            .finish()
    }
}

impl<W> Store<W> for ConcurrentStore<W> {
    fn put(&mut self, key: &str, watcher: Arc<W>) {
        self.insert(key, watcher);
    }

    fn get(&self, key: &str) -> Option<Arc<W>> {
        if is_blank(key) {
            return None;
        }

        self.data.get(key).map(|r| Arc::clone(r.value()))
    }

    fn exists(&self, key: &str) -> bool {
        !is_blank(key) && self.data.contains_key(key)
    }

    fn remove(&mut self, key: &str) -> Option<Arc<W>> {
        self.take(key)
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn get_all(&self) -> Vec<Arc<W>> {
        self.data.iter().map(|r| Arc::clone(r.value())).collect()
    }

    fn clear(&mut self) {
        self.clear_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn put_get_remove() {
        let mut store = ConcurrentStore::new();
        let w = Arc::new("W1");
        store.put("job-1", Arc::clone(&w));

        assert!(store.exists("job-1"));
        assert!(Arc::ptr_eq(&store.get("job-1").unwrap(), &w));

        let removed = store.remove("job-1").unwrap();
        assert!(Arc::ptr_eq(&removed, &w));
        assert_eq!(store.size(), 0);
    }

    #[test]
    fn blank_keys_are_absent() {
        let mut store = ConcurrentStore::new();
        store.put("  ", Arc::new("W1"));
        store.put("job-1", Arc::new("W2"));

        assert_eq!(store.size(), 1);
        assert!(store.get(" ").is_none());
        assert!(!store.exists(""));
        assert!(store.remove("").is_none());
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let mut a = ConcurrentStore::new();
        let b = a.clone();
        a.put("job-1", Arc::new(1));

        assert!(b.exists("job-1"));
        b.clear_all();
        assert_eq!(a.size(), 0);
    }

    #[test]
    fn concurrent_put_is_safe() {
        let store: ConcurrentStore<usize> = ConcurrentStore::with_capacity(1000);
        let mut handles = vec![];

        for i in 0..10 {
            let mut store = store.clone();
            handles.push(thread::spawn(move || {
                for j in 0..100 {
                    store.put(&format!("job_{}_{}", i, j), Arc::new(i * 100 + j));
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(store.size(), 1000);
        assert_eq!(store.get_all().len(), 1000);
    }

    #[test]
    fn concurrent_remove_returns_each_watcher_once() {
        let store: ConcurrentStore<usize> = ConcurrentStore::new();
        for i in 0..100 {
            store.insert(&format!("job_{}", i), Arc::new(i));
        }

        let mut handles = vec![];
        for _ in 0..4 {
            let store = store.clone();
            handles.push(thread::spawn(move || {
                (0..100)
                    .filter(|i| store.take(&format!("job_{}", i)).is_some())
                    .count()
            }));
        }

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 100);
        assert_eq!(store.size(), 0);
    }
}
