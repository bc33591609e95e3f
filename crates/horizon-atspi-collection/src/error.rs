//! Error types for the collection engine.

use std::path::PathBuf;

/// Result type alias for collection operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding or running a collection query.
///
/// Stale nodes met during a traversal and unsupported sort orders are not
/// errors; they shorten or empty the result instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request arguments are malformed.
    #[error("Invalid arguments: {reason}")]
    InvalidArguments { reason: String },

    /// An object path did not resolve to a live object.
    #[error("Object not found: {path}")]
    ObjectNotFound { path: String },

    /// The configuration text is not valid TOML for [`CollectionConfig`](crate::CollectionConfig).
    #[error("Invalid collection config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("Failed to read collection config '{path}': {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid-arguments error.
    pub fn invalid_arguments(reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            reason: reason.into(),
        }
    }

    /// Create an object-not-found error.
    pub fn object_not_found(path: impl Into<String>) -> Self {
        Self::ObjectNotFound { path: path.into() }
    }

    /// Create a config I/O error.
    pub fn config_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigIo {
            path: path.into(),
            source,
        }
    }
}
