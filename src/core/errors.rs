//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for routelint operations
#[derive(Debug, Error)]
pub enum Error {
    /// Local I/O failures during snapshot normalization. Fail-fast: these
    /// are unrecoverable conditions (permissions, disk full) and are never
    /// retried here.
    #[error("filesystem error: {message} ({})", path.display())]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The analysis engine rejected a snapshot. The caller may fix the
    /// directory structure and retry the bind.
    #[error("cannot bind snapshot '{name}': {message}")]
    Bind { name: String, message: String },

    /// A named query failed engine-side. Aborts the remainder of the
    /// current protocol run; no partial report is returned.
    #[error("query '{name}' failed: {cause}")]
    Query { name: String, cause: String },
}

impl Error {
    /// Create a filesystem error with path context
    pub fn filesystem(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            message: message.into(),
            path: path.into(),
            source: Some(source),
        }
    }

    /// Create a bind rejection for a named snapshot
    pub fn bind(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Bind {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a query failure carrying the wire name of the failing query
    pub fn query(name: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::Query {
            name: name.into(),
            cause: cause.into(),
        }
    }

    /// Wire name of the failing query, if this is a query error
    pub fn query_name(&self) -> Option<&str> {
        match self {
            Self::Query { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
