//! Policy watcher record
//!
//! The store never looks inside a watcher; this type exists for the CLI and
//! for callers that want a ready-made record. The schedule expression is
//! carried as text and never interpreted here.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;

/// A scheduled policy, shared between the store and its owner
#[derive(Debug)]
pub struct Watcher {
    /// Policy identifier (Arc for zero-cost cloning into views)
    policy: Arc<str>,
    /// Schedule expression, e.g. a cron string
    schedule: String,
    running: AtomicBool,
}

impl Watcher {
    /// Create a stopped watcher wrapped in the `Arc` the store expects
    pub fn new(policy: impl Into<Arc<str>>, schedule: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            policy: policy.into(),
            schedule: schedule.into(),
            running: AtomicBool::new(false),
        })
    }

    pub fn policy(&self) -> &str {
        &self.policy
    }

    pub fn schedule(&self) -> &str {
        &self.schedule
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Serializable snapshot of this watcher under `key`
    pub fn view(&self, key: &str) -> WatcherView {
        WatcherView {
            key: key.to_string(),
            policy: self.policy.to_string(),
            schedule: self.schedule.clone(),
            running: self.is_running(),
        }
    }
}

/// Point-in-time view of a registered watcher (for JSON output)
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WatcherView {
    pub key: String,
    pub policy: String,
    pub schedule: String,
    pub running: bool,
}
