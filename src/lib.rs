//! Watchstore - keyed registry for scheduler policy watchers

pub mod error;
pub mod manifest;
pub mod store;
pub mod watcher;

pub use error::{FixSuggestion, WatchError};
pub use manifest::{load_store, Backend, Manifest};
pub use store::{is_blank, ConcurrentStore, DefaultStore, Store};
pub use watcher::{Watcher, WatcherView};
