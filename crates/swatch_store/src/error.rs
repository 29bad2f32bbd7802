//! Store error types

use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by theme repositories
#[derive(Error, Debug)]
pub enum StoreError {
    /// Input rejected before touching storage
    #[error("{0}")]
    Validation(String),

    /// No theme with the requested id
    #[error("{0}")]
    NotFound(String),

    /// Reading or writing the backing file failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file holds data that does not describe themes
    #[error("Malformed theme data: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of a [`StoreError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Io,
    Serialization,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Io => "io",
            Self::Serialization => "serialization",
        }
    }
}

impl StoreError {
    pub(crate) fn not_found() -> Self {
        Self::NotFound("Theme not found".to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Io(_) => ErrorKind::Io,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Whether the error is caused by the caller rather than the storage.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }

    /// Message safe to show to a user.
    ///
    /// Storage failures are not described beyond a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) if message.is_empty() => {
                "Invalid input provided.".to_string()
            }
            Self::Validation(message) => message.clone(),
            Self::NotFound(_) => "Theme not found.".to_string(),
            Self::Io(_) | Self::Serialization(_) => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }

    /// Log at `warn` for expected errors and `error` otherwise.
    pub fn log(&self, action: &str, context: &str) {
        let kind = self.kind().as_str();
        if self.is_expected() {
            warn!(action, context, kind, error = %self, "expected store error");
        } else {
            error!(action, context, kind, error = %self, "unexpected store error");
        }
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_hide_storage_details() {
        let io = StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "/var/lib/swatch/themes.json",
        ));
        assert!(!io.is_expected());
        assert_eq!(
            io.user_message(),
            "An unexpected error occurred. Please try again."
        );

        let invalid = StoreError::Validation("Theme name too long".into());
        assert!(invalid.is_expected());
        assert_eq!(invalid.user_message(), "Theme name too long");
        assert_eq!(StoreError::not_found().user_message(), "Theme not found.");
        assert_eq!(StoreError::not_found().kind(), ErrorKind::NotFound);
    }
}
