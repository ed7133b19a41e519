//! Result and error types for Boardcheck.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Boardcheck operations
pub type BoardResult<T> = Result<T, BoardError>;

/// Errors that can occur in Boardcheck
///
/// Only input-contract violations and browser failures are errors. Cards that
/// cannot be read and tickets that cannot be found degrade to empty results.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A ticket record violates the data model
    #[error("Invalid ticket at index {index}: {message}")]
    InvalidTicket {
        /// Position of the record in its list
        index: usize,
        /// What is wrong with it
        message: String,
    },

    /// A manifest field is missing or malformed
    #[error("Invalid manifest field `{field}`: {message}")]
    InvalidManifest {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },

    /// No manifest file exists at any candidate location
    #[error("Manifest not found. Checked locations: {}", format_paths(.checked))]
    ManifestNotFound {
        /// Every path that was tried, in order
        checked: Vec<PathBuf>,
    },

    /// Card selector could not be parsed
    #[error("Invalid selector `{selector}`: {message}")]
    InvalidSelector {
        /// Selector source text
        selector: String,
        /// Error message
        message: String,
    },

    /// Node snapshot is structurally broken
    #[error("Invalid snapshot: {message}")]
    InvalidSnapshot {
        /// Error message
        message: String,
    },

    /// Browser session failure
    #[error("Browser error: {message}")]
    Browser {
        /// Error message
        message: String,
    },

    /// Navigation failure
    #[error("Navigation to {target} failed: {message}")]
    Navigation {
        /// URL or project that failed
        target: String,
        /// Error message
        message: String,
    },

    /// Operation timed out
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl BoardError {
    /// Create an invalid ticket error
    #[must_use]
    pub fn invalid_ticket(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidTicket {
            index,
            message: message.into(),
        }
    }

    /// Create an invalid manifest error
    #[must_use]
    pub fn invalid_manifest(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidManifest {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid snapshot error
    #[must_use]
    pub fn invalid_snapshot(message: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            message: message.into(),
        }
    }

    /// Create a browser error
    #[must_use]
    pub fn browser(message: impl Into<String>) -> Self {
        Self::Browser {
            message: message.into(),
        }
    }

    /// Whether the error is a fatal input-contract violation
    ///
    /// Unparseable JSON or YAML counts too: both only come from reading
    /// manifests and snapshots.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidTicket { .. }
                | Self::InvalidManifest { .. }
                | Self::ManifestNotFound { .. }
                | Self::InvalidSelector { .. }
                | Self::InvalidSnapshot { .. }
                | Self::Json(_)
                | Self::Yaml(_)
        )
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "(none)".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_ticket_names_index() {
        let err = BoardError::invalid_ticket(3, "name is empty");
        assert_eq!(err.to_string(), "Invalid ticket at index 3: name is empty");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_invalid_manifest_names_field() {
        let err = BoardError::invalid_manifest("project", "must not be empty");
        assert!(err.to_string().contains("`project`"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_manifest_not_found_lists_paths() {
        let err = BoardError::ManifestNotFound {
            checked: vec![PathBuf::from("a.json"), PathBuf::from("Data/tickets.json")],
        };
        let msg = err.to_string();
        assert!(msg.contains("a.json"));
        assert!(msg.contains("Data/tickets.json"));
    }

    #[test]
    fn test_manifest_not_found_without_paths() {
        let err = BoardError::ManifestNotFound { checked: vec![] };
        assert!(err.to_string().contains("(none)"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_browser_error_is_not_input() {
        assert!(!BoardError::browser("crashed").is_invalid_input());
        assert!(!BoardError::Timeout { ms: 10 }.is_invalid_input());
    }

    #[test]
    fn test_json_conversion() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: BoardError = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error"));
        assert!(err.is_invalid_input());
    }
}
