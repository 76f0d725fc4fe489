//! STEP (ISO 10303-21) export.
//!
//! Assemblies are written with the AP214 `AUTOMOTIVE_DESIGN` schema:
//!
//! - one root `PRODUCT` named after the assembly
//! - one child `PRODUCT` per part, placed with an identity transform through
//!   `NEXT_ASSEMBLY_USAGE_OCCURRENCE`
//! - each body as a `MANIFOLD_SOLID_BREP` whose shell is written by
//!   truck-stepio, so planes, cylinders and arcs stay exact
//! - part colours as `STYLED_ITEM`s with `COLOUR_RGB`
//!
//! # File Layout
//!
//! ```text
//! ISO-10303-21;
//! HEADER;
//! FILE_DESCRIPTION(...); FILE_NAME(...); FILE_SCHEMA(...);
//! ENDSEC;
//! DATA;
//! #1 = APPLICATION_CONTEXT(...);
//! ...
//! ENDSEC;
//! END-ISO-10303-21;
//! ```
//!
//! Entities are numbered in write order, so encoding the same assembly twice
//! produces identical `DATA` sections.

mod brep;
pub mod error;
mod writer;

pub use error::{StepError, StepResult};
pub use writer::encode_assembly;

use chrono::{Local, NaiveDateTime};

/// Schema identifier written to `FILE_SCHEMA`.
pub const SCHEMA: &str = "AUTOMOTIVE_DESIGN { 1 0 10303 214 1 1 1 1 }";

/// Values for the STEP `HEADER` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepHeader {
    /// Name recorded in `FILE_NAME`.
    pub file_name: String,
    /// Time stamp recorded in `FILE_NAME`.
    pub timestamp: NaiveDateTime,
    /// Author recorded in `FILE_NAME`.
    pub author: String,
}

impl StepHeader {
    /// Header stamped with the current local time.
    #[must_use]
    pub fn now(file_name: impl Into<String>) -> Self {
        Self::at(file_name, Local::now().naive_local())
    }

    /// Header with a fixed time stamp.
    #[must_use]
    pub fn at(file_name: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            file_name: file_name.into(),
            timestamp,
            author: crate::LIBRARY_NAME.to_string(),
        }
    }

    /// Originating system string.
    #[must_use]
    pub fn originating_system() -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}
