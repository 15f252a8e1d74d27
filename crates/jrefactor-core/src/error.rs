//! Error types for tree construction, mutation and configuration

use crate::lst::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jrefactor operations
///
/// There is intentionally no "ambiguous style" error: style inference always
/// degrades to the configured defaults instead of failing.
#[derive(Debug, Error)]
pub enum RefactorError {
    /// A node violates a structural invariant of the tree model
    #[error("Malformed tree: {message}")]
    MalformedTree { message: String },

    /// The anchor of a scoped edit does not resolve in the current tree
    #[error("Anchor {anchor} not found in the current tree")]
    AnchorNotFound { anchor: NodeId },

    /// The parser front end rejected its input
    #[error("Parse error at offset {offset}: {message}")]
    Parse { message: String, offset: u32 },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A rule could not produce or apply its edits
    #[error("Rule error in '{rule_id}': {message}")]
    Rule { rule_id: String, message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedTree,
    AnchorNotFound,
    Parse,
    Config,
    Io,
    Rule,
    Internal,
}

impl RefactorError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RefactorError::MalformedTree { .. } => ErrorKind::MalformedTree,
            RefactorError::AnchorNotFound { .. } => ErrorKind::AnchorNotFound,
            RefactorError::Parse { .. } => ErrorKind::Parse,
            RefactorError::Config { .. } => ErrorKind::Config,
            RefactorError::Io { .. } => ErrorKind::Io,
            RefactorError::Rule { .. } => ErrorKind::Rule,
            RefactorError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (the caller can re-resolve and retry,
    /// or keep the original file and continue with others)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::AnchorNotFound | ErrorKind::Parse | ErrorKind::Rule
        )
    }

    /// Create a malformed tree error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedTree {
            message: message.into(),
        }
    }

    /// Create an anchor-not-found error
    pub fn anchor_not_found(anchor: NodeId) -> Self {
        Self::AnchorNotFound { anchor }
    }

    /// Create a parse error at a byte offset
    pub fn parse_error(message: impl Into<String>, offset: u32) -> Self {
        Self::Parse {
            message: message.into(),
            offset,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a rule error
    pub fn rule_error(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rule {
            rule_id: rule_id.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for RefactorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(RefactorError::anchor_not_found(NodeId::from_raw(7)).is_recoverable());
        assert!(RefactorError::parse_error("unexpected token", 3).is_recoverable());
        assert!(RefactorError::rule_error("add-field", "no such class").is_recoverable());
        assert!(!RefactorError::malformed("while without body").is_recoverable());
        assert!(!RefactorError::config_error("bad indent").is_recoverable());
    }

    #[test]
    fn test_display_mentions_anchor() {
        let err = RefactorError::anchor_not_found(NodeId::from_raw(42));
        assert_eq!(err.to_string(), "Anchor #42 not found in the current tree");
        assert_eq!(err.kind(), ErrorKind::AnchorNotFound);
    }
}
