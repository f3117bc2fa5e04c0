//! DefaultStore - HashMap-backed watcher registry
//!
//! Not safe for concurrent access. Mutation needs `&mut self`; callers that
//! share one instance across threads must wrap it in a lock themselves or
//! switch to `ConcurrentStore`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{is_blank, Store};

/// Keeps the scheduled policy watchers
pub struct DefaultStore<W> {
    /// key → watcher (keys kept as passed to `put`, untrimmed)
    data: HashMap<String, Arc<W>>,
}

impl<W> DefaultStore<W> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Pre-allocate room for `capacity` watchers
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: HashMap::with_capacity(capacity),
        }
    }
}

impl<W> Default for DefaultStore<W> {
    fn default() -> Self {
        Self::new()
    }
}

// Watchers are opaque, so only the keys are shown.
impl<W> fmt::Debug for DefaultStore<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultStore")
            .field("keys", &self.data.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<W> Store<W> for DefaultStore<W> {
    fn put(&mut self, key: &str, watcher: Arc<W>) {
        if is_blank(key) {
            debug!(key, reason = "blank key", "put ignored");
            return;
        }

        let replaced = self.data.insert(key.to_string(), watcher).is_some();
        debug!(key, replaced, "watcher registered");
    }

    fn get(&self, key: &str) -> Option<Arc<W>> {
        if is_blank(key) {
            return None;
        }

        self.data.get(key).map(Arc::clone)
    }

    fn exists(&self, key: &str) -> bool {
        !is_blank(key) && self.data.contains_key(key)
    }

    fn remove(&mut self, key: &str) -> Option<Arc<W>> {
        if is_blank(key) {
            return None;
        }

        let removed = self.data.remove(key);
        debug!(key, hit = removed.is_some(), "watcher removed");
        removed
    }

    fn size(&self) -> usize {
        self.data.len()
    }

    fn get_all(&self) -> Vec<Arc<W>> {
        self.data.values().map(Arc::clone).collect()
    }

    fn clear(&mut self) {
        if self.data.is_empty() {
            return;
        }

        debug!(dropped = self.data.len(), "store cleared");
        self.data.clear();
    }
}
