//! Shared error types for extraction operations

use std::time::Duration;
use thiserror::Error;

/// Main error type for yagfuncs operations.
///
/// Every variant is terminal for an aggregate fetch: the first error
/// encountered fails the whole run with no partial results.
#[derive(Debug, Error)]
pub enum Error {
    /// Content unavailable for a path (network, auth, missing path)
    #[error("{message}")]
    Retrieval { path: String, message: String },

    /// Text is not valid Go source
    #[error("{message}")]
    Parse { path: String, message: String },

    /// An expected top-level declaration or rigid statement shape was absent
    #[error("{message}")]
    ShapeMismatch { path: String, message: String },

    /// The deadline elapsed before the aggregate fetch finished
    #[error("timed out after {after:?}")]
    Cancelled { after: Duration },
}

impl Error {
    /// Create a retrieval error for a path
    pub fn retrieval(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Retrieval {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a parse error for a path
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        let path = path.into();
        let message = message.into();
        Self::Parse {
            message: format!("{path} contains invalid Go code: {message}"),
            path,
        }
    }

    /// Create a shape mismatch error for a path
    pub fn shape_mismatch(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Prefix the error message with a what-was-happening label while
    /// preserving the variant, so callers can still match on the kind.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        let context = context.into();
        match self {
            Self::Retrieval { path, message } => Self::Retrieval {
                path,
                message: format!("{context}: {message}"),
            },
            Self::Parse { path, message } => Self::Parse {
                message: format!("{context}: {message}"),
                path,
            },
            Self::ShapeMismatch { path, message } => Self::ShapeMismatch {
                path,
                message: format!("{context}: {message}"),
            },
            // A timeout bounds the whole aggregate run; per-source context
            // would be misleading.
            Self::Cancelled { after } => Self::Cancelled { after },
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
