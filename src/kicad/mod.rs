//! KiCad project integration.
//!
//! Registers the library in a project's footprint and symbol library tables
//! so KiCad can find it through `${KIPRJMOD}`.

pub mod error;
mod lib_table;
mod setup;

pub use error::{LibTableError, LibTableResult};
pub use lib_table::{
    add_to_table, mentions_library, plan_update, TableKind, TableStatus, TableUpdate,
};
pub use setup::{default_project_dir, relative_library_path, LibrarySetup};
