//! Error types with fix suggestions
//!
//! The store itself never fails. These errors cover manifest loading and the
//! CLI around it.

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Manifest errors (WATCH-010 to WATCH-011)
    // ─────────────────────────────────────────────────────────────

    #[error("WATCH-010: Invalid schema: expected '{expected}', got '{found}'")]
    InvalidSchema { expected: &'static str, found: String },

    #[error("WATCH-011: Manifest declares no watchers")]
    EmptyManifest,

    // ─────────────────────────────────────────────────────────────
    // Lookup errors (WATCH-020)
    // ─────────────────────────────────────────────────────────────

    #[error("WATCH-020: No watcher registered under '{key}'")]
    UnknownKey { key: String },
}

impl FixSuggestion for WatchError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            WatchError::Io(_) => Some("Check file path and permissions"),
            WatchError::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
            WatchError::Json(_) => None,
            WatchError::InvalidSchema { .. } => {
                Some("Set `schema: watchstore/manifest@0.1` at the top of the manifest")
            }
            WatchError::EmptyManifest => Some("Add at least one entry under `watchers:`"),
            WatchError::UnknownKey { .. } => {
                Some("Keys are matched exactly (no trimming); check spelling and whitespace")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_in_messages() {
        let err = WatchError::InvalidSchema {
            expected: "watchstore/manifest@0.1",
            found: "scheduler/jobs@2".to_string(),
        };
        assert!(err.to_string().starts_with("WATCH-010"));
        assert!(err.to_string().contains("scheduler/jobs@2"));

        let err = WatchError::UnknownKey {
            key: "job-9".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "WATCH-020: No watcher registered under 'job-9'"
        );
    }

    #[test]
    fn suggestions() {
        assert!(WatchError::EmptyManifest.fix_suggestion().is_some());

        let io = WatchError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "nope"));
        assert_eq!(io.fix_suggestion(), Some("Check file path and permissions"));
    }
}
