//! yannlib-tools: STEP model generators and KiCad setup for the YannLib
//! component library.
//!
//! # Architecture
//!
//! Models are composed from a small set of solid primitives and written as
//! STEP files next to the footprints:
//!
//! - **Geometry**: boxes with filleted edges, cylinders, disjoint union and
//!   cylindrical pocket cuts on exact truck B-reps
//! - **Models**: named, coloured parts grouped into an assembly
//! - **STEP export**: AP214 files KiCad's 3D viewer can load
//! - **KiCad setup**: registering the library in the project's footprint and
//!   symbol library tables
//!
//! # Modules
//!
//! - [`config`]: Configuration loading and validation
//! - [`error`]: Configuration error types
//! - [`geometry`]: Solid modelling primitives
//! - [`model`]: Parts and assemblies
//! - [`step`]: STEP file encoding
//! - [`components`]: Supported component models
//! - [`kicad`]: Library table registration

pub mod components;
pub mod config;
pub mod error;
pub mod geometry;
pub mod kicad;
pub mod model;
pub mod step;

/// Library name used in library tables, file names and STEP headers.
pub const LIBRARY_NAME: &str = "YannLib";
