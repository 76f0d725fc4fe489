//! Pin 1 orientation marker.

use crate::geometry::{Cylinder, GeometryResult, Point3, Solid, Tessellation, Vector3};

/// A flat disc marking pin 1. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSpec {
    /// Disc radius (mm).
    pub radius: f64,
    /// Disc thickness (mm).
    pub thickness: f64,
    /// Disc centre X (mm).
    pub x: f64,
    /// Disc centre Y (mm).
    pub y: f64,
    /// Disc centre Z (mm).
    pub z: f64,
}

impl MarkerSpec {
    /// Centre of the disc.
    #[must_use]
    pub fn centre(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

/// Builds the marker disc.
///
/// # Errors
///
/// Returns an error if the radius or thickness is not positive.
pub fn pin1_marker(spec: &MarkerSpec, tessellation: &Tessellation) -> GeometryResult<Solid> {
    Cylinder::new(spec.thickness, spec.radius)
        .translate(Vector3::new(spec.x, spec.y, spec.z))
        .build(tessellation)
}
