//! Error types for KiCad library table handling.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for library table operations.
pub type LibTableResult<T> = Result<T, LibTableError>;

/// Errors that can occur while registering the library with a project.
#[derive(Debug, Error)]
pub enum LibTableError {
    /// The library directory is not a descendant of the project directory.
    #[error("Library must be inside project directory")]
    NotInsideProject {
        /// Resolved library directory.
        library: PathBuf,
        /// Resolved project directory.
        project: PathBuf,
    },

    /// A directory could not be resolved to an absolute path.
    #[error("Failed to resolve path: {path}")]
    ResolvePath {
        /// Path as given.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to read an existing table file.
    #[error("Failed to read library table: {path}")]
    FileRead {
        /// Path to the table file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write a table file.
    #[error("Failed to write library table: {path}")]
    FileWrite {
        /// Path to the table file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl LibTableError {
    /// Creates a path resolution error.
    pub fn resolve_path(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ResolvePath {
            path: path.into(),
            source,
        }
    }

    /// Creates a file read error.
    pub fn file_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}
