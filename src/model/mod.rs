//! Named, coloured assemblies of solids.
//!
//! An [`Assembly`] keeps its parts in insertion order, which is also the
//! order they appear in the exported STEP file.

pub mod error;

pub use error::{ModelError, ModelResult};

use std::path::Path;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::geometry::Solid;
use crate::step::{self, StepHeader};

/// An RGB colour with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Creates a colour; components are clamped into `[0, 1]` on export.
    #[must_use]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Returns the colour with every component clamped into `[0, 1]`.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self::rgb(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A named solid with a display colour.
#[derive(Debug, Clone)]
pub struct Part {
    name: String,
    solid: Solid,
    color: Color,
}

impl Part {
    /// Creates a white part.
    #[must_use]
    pub fn new(name: impl Into<String>, solid: Solid) -> Self {
        Self {
            name: name.into(),
            solid,
            color: Color::default(),
        }
    }

    /// Sets the display colour.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Part name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Part geometry.
    #[must_use]
    pub const fn solid(&self) -> &Solid {
        &self.solid
    }

    /// Display colour.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }
}

/// An ordered collection of uniquely named parts.
///
/// ```
/// use yannlib_tools::geometry::{Block, Tessellation};
/// use yannlib_tools::model::{Assembly, Color, Part};
///
/// let tess = Tessellation::default();
/// let mut assembly = Assembly::new("DEMO");
/// let cube = Block::new(1.0, 1.0, 1.0).build(&tess).unwrap();
/// assembly
///     .add_part(Part::new("body", cube).with_color(Color::rgb(0.2, 0.2, 0.2)))
///     .unwrap();
/// assert_eq!(assembly.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Assembly {
    name: String,
    parts: IndexMap<String, Part>,
}

impl Assembly {
    /// Creates an empty assembly.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: IndexMap::new(),
        }
    }

    /// Assembly name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a part at the end of the assembly.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::DuplicatePart`] if a part with the same name
    /// already exists.
    pub fn add_part(&mut self, part: Part) -> ModelResult<()> {
        if self.parts.contains_key(part.name()) {
            return Err(ModelError::DuplicatePart {
                name: part.name().to_string(),
            });
        }
        debug!(
            assembly = %self.name,
            part = %part.name(),
            bodies = part.solid().bodies().len(),
            "Added part"
        );
        self.parts.insert(part.name().to_string(), part);
        Ok(())
    }

    /// Looks up a part by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Part> {
        self.parts.get(name)
    }

    /// Parts in insertion order.
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    /// Part names in insertion order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns `true` if the assembly has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Encodes the assembly as STEP text.
    ///
    /// # Errors
    ///
    /// Returns an error if a part's B-rep cannot be encoded.
    pub fn to_step(&self, header: &StepHeader) -> ModelResult<String> {
        Ok(step::encode_assembly(self, header)?)
    }

    /// Writes the assembly to a STEP file, replacing any existing file.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the assembly is empty, cannot be encoded, or the
    /// file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> ModelResult<()> {
        let path = path.as_ref();
        if self.is_empty() {
            return Err(ModelError::EmptyAssembly {
                name: self.name.clone(),
            });
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ModelError::file_write(parent, e))?;
        }

        let file_name = path
            .file_name()
            .map_or_else(|| format!("{}.step", self.name), |n| n.to_string_lossy().into_owned());
        let contents = self.to_step(&StepHeader::now(file_name))?;
        std::fs::write(path, contents).map_err(|e| ModelError::file_write(path, e))?;

        info!(path = %path.display(), parts = self.len(), "Saved STEP file");
        Ok(())
    }
}
