//! Registering the library with a KiCad project.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{LibTableError, LibTableResult};
use super::lib_table::{add_to_table, TableKind, TableStatus};

/// Path of `library_dir` relative to `project_dir`, joined with `/`.
///
/// Returns `"."` when both are the same directory and `None` when the
/// library is not inside the project.
#[must_use]
pub fn relative_library_path(project_dir: &Path, library_dir: &Path) -> Option<String> {
    let relative = library_dir.strip_prefix(project_dir).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        Some(".".to_string())
    } else {
        Some(parts.join("/"))
    }
}

/// Default project root for a library: two directories up.
///
/// A library at `<project>/libs/YannLib` belongs to `<project>`. Paths
/// shorter than that resolve to their root, so `/YannLib` belongs to `/`.
#[must_use]
pub fn default_project_dir(library_dir: &Path) -> PathBuf {
    library_dir
        .ancestors()
        .take(3)
        .last()
        .map_or_else(PathBuf::new, Path::to_path_buf)
}

/// A validated library/project pair, ready to update the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySetup {
    library_dir: PathBuf,
    project_dir: PathBuf,
    relative_path: String,
}

impl LibrarySetup {
    /// Resolves both directories and checks the library sits inside the
    /// project. No file is touched.
    ///
    /// When `project_dir` is `None`, the project is the directory two levels
    /// above the library.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be resolved or the library is
    /// outside the project.
    pub fn new(library_dir: &Path, project_dir: Option<&Path>) -> LibTableResult<Self> {
        let library_dir = std::fs::canonicalize(library_dir)
            .map_err(|e| LibTableError::resolve_path(library_dir, e))?;
        let project_dir = match project_dir {
            Some(dir) => {
                std::fs::canonicalize(dir).map_err(|e| LibTableError::resolve_path(dir, e))?
            }
            None => default_project_dir(&library_dir),
        };

        let Some(relative_path) = relative_library_path(&project_dir, &library_dir) else {
            return Err(LibTableError::NotInsideProject {
                library: library_dir,
                project: project_dir,
            });
        };

        debug!(
            library = %library_dir.display(),
            project = %project_dir.display(),
            relative = %relative_path,
            "Resolved library location"
        );
        Ok(Self {
            library_dir,
            project_dir,
            relative_path,
        })
    }

    /// Absolute library directory.
    #[must_use]
    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    /// Absolute project directory.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Library path relative to the project, `/`-separated.
    #[must_use]
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    /// Location of the given table file.
    #[must_use]
    pub fn table_path(&self, kind: TableKind) -> PathBuf {
        self.project_dir.join(kind.file_name())
    }

    /// Adds the library to one table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read or written.
    pub fn register(&self, kind: TableKind) -> LibTableResult<TableStatus> {
        add_to_table(
            &self.table_path(kind),
            kind,
            &kind.entry(&self.relative_path),
        )
    }

    /// Adds the library to both tables, footprints first.
    ///
    /// # Errors
    ///
    /// Returns the first read or write error; tables updated before the
    /// failure keep their new content.
    pub fn register_all(&self) -> LibTableResult<Vec<(TableKind, TableStatus)>> {
        TableKind::ALL
            .iter()
            .map(|&kind| self.register(kind).map(|status| (kind, status)))
            .collect()
    }
}
