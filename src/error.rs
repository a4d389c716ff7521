//! Error types surfaced by configuration loading.
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a [`crate::config::SkulkConfig`] could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration text was not valid JSON for the expected schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field held a value the controllers cannot work with.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable description of the constraint.
        reason: String,
    },
}

impl ConfigError {
    /// Convenience constructor for [`ConfigError::Invalid`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
