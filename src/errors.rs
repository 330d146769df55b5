//! Error types for lobbymap.
//!
//! The scoring, similarity and surge computations never fail on ordinary
//! input; degenerate records are handled with documented defaults and logged.
//! What can fail is everything around them:
//!
//! - `Configuration`: a scheme or threshold ladder that violates its
//!   invariants. Fatal, reported once at startup with *every* issue found.
//! - `Dataset`: a dataset file that is missing or malformed.
//! - Lookups by name or id that match nothing.
//!
//! # Example
//!
//! ```rust
//! use lobbymap::errors::{ConfigIssue, Error};
//!
//! let err = Error::configuration("schemes.client_influence", "weights sum to 0.900");
//! assert!(err.is_user_fixable());
//! assert_eq!(err.issues().len(), 1);
//! ```

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single configuration problem, located by a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Main error type for lobbymap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid scoring scheme, tier ladder or surge thresholds
    #[error("Configuration error: {}", join_issues(.0))]
    Configuration(Vec<ConfigIssue>),

    /// Dataset missing or malformed
    #[error("Dataset error: {message}")]
    Dataset {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Unknown scoring scheme: {0}")]
    UnknownScheme(String),

    #[error("Unknown surge context: {0}")]
    UnknownSurgeContext(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    /// Create a configuration error holding a single issue.
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration(vec![ConfigIssue::new(field, message)])
    }

    /// Create a dataset error with path context.
    pub fn dataset(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Dataset {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Configuration issues carried by this error (empty for other variants).
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            Self::Configuration(issues) => issues,
            _ => &[],
        }
    }

    /// Flatten into configuration issues, attributing non-configuration
    /// errors to `field`.
    pub fn into_issues(self, field: &str) -> Vec<ConfigIssue> {
        match self {
            Self::Configuration(issues) => issues,
            other => vec![ConfigIssue::new(field, other.to_string())],
        }
    }

    /// Whether the user can resolve this by editing configuration or input.
    pub fn is_user_fixable(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
