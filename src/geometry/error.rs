//! Error types for geometry construction.

use thiserror::Error;

/// Result type for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors that can occur while building or combining solids.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// A length that must be positive was zero, negative or not finite.
    #[error("Invalid dimension '{name}': {value}")]
    InvalidDimension {
        /// Dimension name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Fillet radius does not fit the edges it rounds.
    #[error("Fillet radius {radius} is too large (must be below {limit})")]
    FilletTooLarge {
        /// Requested radius.
        radius: f64,
        /// Exclusive upper bound.
        limit: f64,
    },

    /// Tessellation setting is too coarse to represent a curve.
    #[error("Invalid tessellation: {message}")]
    InvalidTessellation {
        /// Description of what's wrong.
        message: String,
    },

    /// Union of bodies whose volumes intersect.
    #[error("Cannot union overlapping bodies")]
    OverlappingUnion,

    /// The cutting tool does not form a pocket in a planar top face.
    #[error("Unsupported cut: {reason}")]
    UnsupportedCut {
        /// Why the cut was rejected.
        reason: String,
    },

    /// The boolean operation found no consistent result.
    #[error("Boolean operation failed: {operation}")]
    BooleanFailed {
        /// Operation that failed.
        operation: &'static str,
    },

    /// The modelling kernel rejected a wire, face or shell.
    #[error("Modelling error: {message}")]
    Modelling {
        /// Kernel error message.
        message: String,
    },

    /// An operation that needs at least one body received none.
    #[error("Empty solid")]
    EmptySolid,
}

impl GeometryError {
    /// Creates an unsupported cut error.
    pub fn unsupported_cut(reason: impl Into<String>) -> Self {
        Self::UnsupportedCut {
            reason: reason.into(),
        }
    }

    /// Wraps a modelling kernel error.
    pub fn modelling(err: impl std::fmt::Display) -> Self {
        Self::Modelling {
            message: err.to_string(),
        }
    }

    /// Creates an invalid tessellation error.
    pub fn invalid_tessellation(message: impl Into<String>) -> Self {
        Self::InvalidTessellation {
            message: message.into(),
        }
    }
}

/// Checks that a length is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> GeometryResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidDimension { name, value })
    }
}
