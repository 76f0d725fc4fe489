//! Footprint and symbol library table editing.
//!
//! KiCad lists project-local libraries in `fp-lib-table` and `sym-lib-table`,
//! two S-expression files in the project root:
//!
//! ```text
//! (fp_lib_table
//!   (lib (name "YannLib")(type "KiCad")(uri "${KIPRJMOD}/libs/YannLib/YannLib.pretty")(options "")(descr "YannLib footprints"))
//! )
//! ```
//!
//! Tables are edited textually. A table that already mentions `"YannLib"`
//! anywhere is left untouched.

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use super::error::{LibTableError, LibTableResult};
use crate::LIBRARY_NAME;

/// The two library tables KiCad reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    /// `fp-lib-table`, pointing at the `.pretty` footprint directory.
    Footprint,
    /// `sym-lib-table`, pointing at the `.kicad_sym` symbol file.
    Symbol,
}

impl TableKind {
    /// Both tables, in the order they are updated.
    pub const ALL: [Self; 2] = [Self::Footprint, Self::Symbol];

    /// Short name used in the table header and status output.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Footprint => "fp",
            Self::Symbol => "sym",
        }
    }

    /// Table file name in the project root.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Footprint => "fp-lib-table",
            Self::Symbol => "sym-lib-table",
        }
    }

    /// Library file or directory name inside the library root.
    #[must_use]
    pub const fn library_file(self) -> &'static str {
        match self {
            Self::Footprint => "YannLib.pretty",
            Self::Symbol => "YannLib.kicad_sym",
        }
    }

    /// Description recorded in the entry.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Footprint => "YannLib footprints",
            Self::Symbol => "YannLib symbols",
        }
    }

    /// Builds the table entry for a library at `relative_path` below the
    /// project root.
    #[must_use]
    pub fn entry(self, relative_path: &str) -> String {
        format!(
            "  (lib (name \"{LIBRARY_NAME}\")(type \"KiCad\")(uri \"${{KIPRJMOD}}/{relative_path}/{}\")(options \"\")(descr \"{}\"))",
            self.library_file(),
            self.description(),
        )
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// The edit needed to register the library in one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableUpdate {
    /// No table exists yet; write this content.
    Create(String),
    /// The table exists without the library; replace it with this content.
    Append(String),
    /// The table already mentions the library.
    Unchanged,
}

/// Outcome of registering the library in one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    /// A new table file was written.
    Created,
    /// The entry was appended to an existing table.
    Appended,
    /// The table already referenced the library.
    AlreadyConfigured,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "Created with {LIBRARY_NAME}"),
            Self::Appended => write!(f, "Added {LIBRARY_NAME}"),
            Self::AlreadyConfigured => write!(f, "{LIBRARY_NAME} already configured"),
        }
    }
}

/// Returns `true` if the table text already mentions the library.
///
/// This is a plain substring test on the quoted name, so a comment or a
/// description containing `"YannLib"` also counts.
#[must_use]
pub fn mentions_library(content: &str) -> bool {
    content.contains(&format!("\"{LIBRARY_NAME}\""))
}

/// Decides how to add `entry` to a table whose current content is
/// `existing` (`None` when the file does not exist).
#[must_use]
pub fn plan_update(kind: TableKind, existing: Option<&str>, entry: &str) -> TableUpdate {
    match existing {
        None => TableUpdate::Create(format!("({}_lib_table\n{entry}\n)\n", kind.short_name())),
        Some(content) if mentions_library(content) => TableUpdate::Unchanged,
        Some(content) => {
            let trimmed = content.trim_end();
            // Only the table's own closing paren is removed.
            let body = trimmed.strip_suffix(')').unwrap_or(trimmed);
            TableUpdate::Append(format!("{body}\n{entry}\n)\n"))
        }
    }
}

/// Adds `entry` to the table file at `path`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the existing file cannot be read or the new content
/// cannot be written.
pub fn add_to_table(path: &Path, kind: TableKind, entry: &str) -> LibTableResult<TableStatus> {
    let existing = if path.exists() {
        Some(std::fs::read_to_string(path).map_err(|e| LibTableError::file_read(path, e))?)
    } else {
        None
    };

    let (content, status) = match plan_update(kind, existing.as_deref(), entry) {
        TableUpdate::Unchanged => {
            debug!(path = %path.display(), "Library already in table");
            return Ok(TableStatus::AlreadyConfigured);
        }
        TableUpdate::Create(content) => (content, TableStatus::Created),
        TableUpdate::Append(content) => (content, TableStatus::Appended),
    };

    std::fs::write(path, content).map_err(|e| LibTableError::file_write(path, e))?;
    info!(path = %path.display(), table = %kind, ?status, "Updated library table");
    Ok(status)
}
