//! Watcher manifest parsing
//!
//! A manifest is a YAML file listing the watchers to register and the store
//! backend to register them in.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::WatchError;
use crate::store::{is_blank, ConcurrentStore, DefaultStore, Store};
use crate::watcher::Watcher;

pub const MANIFEST_SCHEMA: &str = "watchstore/manifest@0.1";

/// Manifest parsed from YAML
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub schema: String,
    #[serde(default)]
    pub backend: Backend,
    /// Pre-allocation hint for the store
    #[serde(default)]
    pub capacity: Option<usize>,
    #[serde(default)]
    pub watchers: Vec<WatcherEntry>,
}

/// Store implementation to populate
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// HashMap-backed, single owner (default)
    #[default]
    Default,

    /// DashMap-backed, shareable across threads
    Concurrent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatcherEntry {
    pub key: String,
    pub policy: String,
    #[serde(default)]
    pub schedule: String,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Default => write!(f, "default"),
            Backend::Concurrent => write!(f, "concurrent"),
        }
    }
}

impl Manifest {
    /// Read and validate a manifest file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WatchError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Parse and validate a manifest from memory
    pub fn from_yaml(yaml: &str) -> Result<Self, WatchError> {
        let manifest: Manifest = serde_yaml::from_str(yaml)?;

        if manifest.schema != MANIFEST_SCHEMA {
            return Err(WatchError::InvalidSchema {
                expected: MANIFEST_SCHEMA,
                found: manifest.schema,
            });
        }
        if manifest.watchers.is_empty() {
            return Err(WatchError::EmptyManifest);
        }

        Ok(manifest)
    }

    /// Empty store of the configured backend
    pub fn build_store(&self) -> Box<dyn Store<Watcher>> {
        let capacity = self.capacity.unwrap_or(self.watchers.len());
        match self.backend {
            Backend::Default => Box::new(DefaultStore::<Watcher>::with_capacity(capacity)),
            Backend::Concurrent => Box::new(ConcurrentStore::<Watcher>::with_capacity(capacity)),
        }
    }

    /// Register every entry in file order, so a repeated key keeps its last
    /// watcher. Returns how many entries the store accepted.
    pub fn populate(&self, store: &mut dyn Store<Watcher>) -> usize {
        let mut accepted = 0;
        for entry in &self.watchers {
            if is_blank(&entry.key) {
                warn!(policy = %entry.policy, "skipping watcher with blank key");
                continue;
            }
            let watcher = Watcher::new(entry.policy.as_str(), entry.schedule.as_str());
            store.put(&entry.key, watcher);
            accepted += 1;
        }

        debug!(accepted, size = store.size(), "manifest loaded");
        accepted
    }

    /// Number of entries whose key is blank (never stored)
    pub fn blank_keys(&self) -> usize {
        self.watchers.iter().filter(|e| is_blank(&e.key)).count()
    }

    /// Keys declared more than once, sorted
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut dups = BTreeSet::new();
        for entry in self.watchers.iter().filter(|e| !is_blank(&e.key)) {
            if !seen.insert(entry.key.as_str()) {
                dups.insert(entry.key.as_str());
            }
        }
        dups.into_iter().collect()
    }

    /// Distinct non-blank keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        self.watchers
            .iter()
            .map(|e| e.key.as_str())
            .filter(|k| !is_blank(k))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Load `path` and build a populated store of its configured backend
pub fn load_store(
    path: impl AsRef<Path>,
) -> Result<(Manifest, Box<dyn Store<Watcher>>), WatchError> {
    let manifest = Manifest::load(path)?;
    let mut store = manifest.build_store();
    manifest.populate(store.as_mut());
    Ok((manifest, store))
}
