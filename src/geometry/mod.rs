//! Solid modelling for component 3D models.
//!
//! Solids are exact B-reps built with the truck kernel: planes, cylinders
//! and circular arcs are kept as analytic surfaces and curves.
//!
//! - [`Outline`]: rounded rectangle in the XY plane
//! - [`Block`]: box centred in X/Y resting on Z=0, with optional fillets
//! - [`Cylinder`]: Z-axis cylinder, usable as a solid or as a cutting tool
//! - [`Solid`]: one or more disjoint [`Body`] B-reps with translate, union and cut
//!
//! Bounding boxes are computed from the primitive dimensions, so they are
//! exact whatever the [`Tessellation`].

pub mod error;
mod outline;
mod primitives;
mod solid;

pub use error::{GeometryError, GeometryResult};
pub use outline::Outline;
pub use primitives::{Block, Cylinder};
pub use solid::{Body, Solid};

/// Point in model space (mm).
pub use truck_modeling::Point3;

/// Vector in model space (mm).
pub use truck_modeling::Vector3;

use truck_modeling::EuclideanSpace;

/// Tolerance for geometric comparisons (mm).
pub const TOLERANCE: f64 = 1e-9;

/// Smallest mesh tolerance truck's boolean operations accept (mm).
pub const MIN_MESH_TOLERANCE: f64 = 1e-6;

/// Controls how curved surfaces are approximated.
///
/// Only the top fillet of a [`Block`] is approximated in the B-rep itself.
/// The mesh tolerance is the chord error used by boolean operations and
/// volume measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tessellation {
    /// Ruled bands per quarter arc of a top fillet.
    pub arc_segments: usize,
    /// Maximum chord deviation when meshing curved faces (mm).
    pub mesh_tolerance: f64,
}

impl Tessellation {
    /// Eight bands per fillet arc, 0.01 mm chord tolerance.
    pub const DEFAULT: Self = Self::new(8, 0.01);

    /// Creates a tessellation setting.
    #[must_use]
    pub const fn new(arc_segments: usize, mesh_tolerance: f64) -> Self {
        Self {
            arc_segments,
            mesh_tolerance,
        }
    }

    /// Checks that both settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidTessellation`] if there are no arc
    /// segments or the mesh tolerance is below [`MIN_MESH_TOLERANCE`].
    pub fn validate(&self) -> GeometryResult<()> {
        if self.arc_segments == 0 {
            return Err(GeometryError::invalid_tessellation(
                "arc segments must be at least 1",
            ));
        }
        if !(self.mesh_tolerance.is_finite() && self.mesh_tolerance >= MIN_MESH_TOLERANCE) {
            return Err(GeometryError::invalid_tessellation(format!(
                "mesh tolerance must be at least {MIN_MESH_TOLERANCE}, got {}",
                self.mesh_tolerance
            )));
        }
        Ok(())
    }
}

impl Default for Tessellation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl BoundingBox {
    /// Creates an empty box (min > max) ready to be expanded.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Builds the smallest box containing all points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.include(point);
        }
        bbox
    }

    /// Returns `true` if no point has been included yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Expands the box to contain `point`.
    pub fn include(&mut self, point: &Point3) {
        self.min = Point3::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Point3::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }

    /// Returns the smallest box containing both boxes.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let mut bbox = *self;
        bbox.include(&other.min);
        bbox.include(&other.max);
        bbox
    }

    /// The box moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    /// Centre point.
    #[must_use]
    pub fn centre(&self) -> Point3 {
        self.min.midpoint(self.max)
    }

    /// Returns `true` if the boxes share a region of positive volume.
    ///
    /// Boxes that merely touch do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..3).all(|axis| {
            self.min[axis] < other.max[axis] - TOLERANCE
                && other.min[axis] < self.max[axis] - TOLERANCE
        })
    }
}
