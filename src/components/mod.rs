//! Component model generators.
//!
//! Each supported part is a [`ComponentModel`] built from hard-coded
//! datasheet dimensions. Models are assembled from three parts:
//!
//! - the moulded body ([`body`])
//! - the terminal pads ([`pads`])
//! - a pin 1 marker disc ([`marker`])
//!
//! ```
//! use yannlib_tools::components;
//! use yannlib_tools::geometry::Tessellation;
//!
//! let model = components::find("xrrf1280").unwrap();
//! let assembly = model.build(&Tessellation::default()).unwrap();
//! assert_eq!(assembly.name(), "XRRF1280");
//! ```

pub mod body;
pub mod marker;
pub mod pads;

mod bcohl1041;
mod xrrf1280;

pub use bcohl1041::Bcohl1041;
pub use xrrf1280::Xrrf1280;

use std::path::{Path, PathBuf};

use crate::geometry::Tessellation;
use crate::model::{Assembly, ModelResult};

/// Directory, relative to the library root, holding generated models.
pub const MODELS_DIR: &str = "YannLib.3dmodels";

/// A component whose 3D model can be generated.
pub trait ComponentModel {
    /// Part number, also used as the assembly and file name.
    fn name(&self) -> &'static str;

    /// One-line description of the part.
    fn description(&self) -> &'static str;

    /// Builds the coloured assembly for this component.
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the model cannot be built.
    fn build(&self, tessellation: &Tessellation) -> ModelResult<Assembly>;

    /// Location of the generated STEP file inside `library_dir`.
    fn output_path(&self, library_dir: &Path) -> PathBuf {
        output_path(library_dir, self.name())
    }
}

/// Every component this crate can generate, in display order.
#[must_use]
pub fn catalogue() -> Vec<Box<dyn ComponentModel>> {
    vec![Box::new(Bcohl1041), Box::new(Xrrf1280)]
}

/// Looks up a component by part number, ignoring case.
#[must_use]
pub fn find(name: &str) -> Option<Box<dyn ComponentModel>> {
    catalogue()
        .into_iter()
        .find(|model| model.name().eq_ignore_ascii_case(name))
}

/// Returns `<library_dir>/YannLib.3dmodels/<name>.step`.
#[must_use]
pub fn output_path(library_dir: &Path, name: &str) -> PathBuf {
    library_dir.join(MODELS_DIR).join(format!("{name}.step"))
}
