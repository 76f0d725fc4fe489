//! Error types for STEP encoding.

use thiserror::Error;

/// Result type for STEP encoding.
pub type StepResult<T> = Result<T, StepError>;

/// Errors that can occur while merging B-rep entities into an assembly file.
#[derive(Debug, Error)]
pub enum StepError {
    /// An entity instance could not be split into id and value.
    #[error("Malformed STEP entity: {record}")]
    Malformed {
        /// The offending record.
        record: String,
    },

    /// A reference points at an entity that was never defined.
    #[error("Undefined STEP entity #{id}")]
    UndefinedReference {
        /// Referenced id.
        id: usize,
    },

    /// A body produced no shell to export.
    #[error("No closed shell in B-rep of part '{part}'")]
    NoShell {
        /// Part name.
        part: String,
    },
}

impl StepError {
    /// Creates a malformed entity error.
    pub fn malformed(record: impl Into<String>) -> Self {
        Self::Malformed {
            record: record.into(),
        }
    }
}
