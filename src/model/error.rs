//! Error types for assembly composition and export.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::GeometryError;
use crate::step::StepError;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while composing or saving a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Geometry construction failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// STEP encoding failed.
    #[error(transparent)]
    Step(#[from] StepError),

    /// Part with the given name already exists.
    #[error("Part '{name}' already exists in assembly")]
    DuplicatePart {
        /// The duplicate part name.
        name: String,
    },

    /// Assembly has no parts to export.
    #[error("Cannot export empty assembly '{name}'")]
    EmptyAssembly {
        /// Assembly name.
        name: String,
    },

    /// Failed to write the output file.
    #[error("Failed to write file: {path}")]
    FileWrite {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl ModelError {
    /// Creates a file write error.
    pub fn file_write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}
