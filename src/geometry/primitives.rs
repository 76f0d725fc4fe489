//! Primitive solids: filleted blocks and cylinders.

use std::f64::consts::{FRAC_PI_2, TAU};

use tracing::trace;
use truck_modeling::{builder, EuclideanSpace, Rad, Shell, Solid as Brep, Wire};

use super::error::{ensure_positive, GeometryError, GeometryResult};
use super::outline::Outline;
use super::solid::{Body, Solid, TopFace};
use super::{BoundingBox, Point3, Tessellation, Vector3};

/// A box centred in X/Y resting on the Z=0 plane.
///
/// ```
/// use yannlib_tools::geometry::{Block, Tessellation};
///
/// let body = Block::new(10.0, 10.0, 4.1)
///     .fillet_vertical_edges(0.5)
///     .build(&Tessellation::default())
///     .unwrap();
/// assert!(body.is_closed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    width: f64,
    length: f64,
    height: f64,
    vertical_radius: f64,
    top_radius: f64,
}

impl Block {
    /// Creates a block `width` (X) by `length` (Y) by `height` (Z).
    #[must_use]
    pub const fn new(width: f64, length: f64, height: f64) -> Self {
        Self {
            width,
            length,
            height,
            vertical_radius: 0.0,
            top_radius: 0.0,
        }
    }

    /// Rounds the four vertical edges.
    #[must_use]
    pub const fn fillet_vertical_edges(mut self, radius: f64) -> Self {
        self.vertical_radius = radius;
        self
    }

    /// Rounds every edge of the top face.
    ///
    /// Requires rounded vertical edges with a larger radius.
    #[must_use]
    pub const fn fillet_top_edges(mut self, radius: f64) -> Self {
        self.top_radius = radius;
        self
    }

    /// Builds the solid.
    ///
    /// Vertical fillets are exact cylinder patches. A top fillet is made of
    /// `arc_segments` ruled bands whose edges lie on the true quarter round.
    ///
    /// # Errors
    ///
    /// Returns an error if a dimension is not positive, a fillet radius does
    /// not fit, or the tessellation is unusable.
    pub fn build(&self, tessellation: &Tessellation) -> GeometryResult<Solid> {
        ensure_positive("width", self.width)?;
        ensure_positive("length", self.length)?;
        ensure_positive("height", self.height)?;
        tessellation.validate()?;
        self.check_fillets()?;

        let base = Outline::new(self.width, self.length, self.vertical_radius);
        let brep = if self.top_radius > 0.0 {
            self.rounded_top(&base, tessellation.arc_segments)?
        } else {
            extrude(&base, 0.0, self.height)?
        };

        let bounds = BoundingBox {
            min: Point3::new(-base.half_width, -base.half_length, 0.0),
            max: Point3::new(base.half_width, base.half_length, self.height),
        };
        let top = TopFace {
            outline: base.inset(self.top_radius),
            z: self.height,
        };

        trace!(
            width = self.width,
            length = self.length,
            height = self.height,
            faces = brep.boundaries()[0].len(),
            "Built block"
        );
        Ok(Body::new(brep, bounds, Some(top)).into())
    }

    fn check_fillets(&self) -> GeometryResult<()> {
        if self.vertical_radius > 0.0 {
            let limit = self.width.min(self.length) / 2.0;
            if self.vertical_radius >= limit {
                return Err(GeometryError::FilletTooLarge {
                    radius: self.vertical_radius,
                    limit,
                });
            }
        }
        if self.top_radius > 0.0 {
            let limit = self.vertical_radius.min(self.height);
            if self.top_radius >= limit {
                return Err(GeometryError::FilletTooLarge {
                    radius: self.top_radius,
                    limit,
                });
            }
        }
        Ok(())
    }

    /// Stacks the straight walls and the fillet bands into one shell.
    #[allow(clippy::cast_precision_loss)] // Segment counts are small
    fn rounded_top(&self, base: &Outline, segments: usize) -> GeometryResult<Brep> {
        let r = self.top_radius;
        let mut sections: Vec<Wire> = vec![base.wire(0.0), base.wire(self.height - r)];
        for step in 1..=segments {
            let angle = FRAC_PI_2 * step as f64 / segments as f64;
            let z = if step == segments {
                self.height
            } else {
                r.mul_add(angle.sin(), self.height - r)
            };
            sections.push(base.inset(r * (1.0 - angle.cos())).wire(z));
        }

        let mut faces = Vec::with_capacity(sections.len() * 8 + 2);
        let bottom = builder::try_attach_plane(&[sections[0].inverse()]);
        faces.push(bottom.map_err(GeometryError::modelling)?);
        for pair in sections.windows(2) {
            let band: Shell = builder::try_wire_homotopy(&pair[0], &pair[1])
                .map_err(GeometryError::modelling)?;
            faces.extend(band.face_iter().cloned());
        }
        let top = sections.last().ok_or(GeometryError::EmptySolid)?;
        let top = builder::try_attach_plane(&[top.clone()]);
        faces.push(top.map_err(GeometryError::modelling)?);

        Brep::try_new(vec![Shell::from(faces)]).map_err(GeometryError::modelling)
    }
}

/// Sweeps the outline at `z` straight up by `height`.
fn extrude(outline: &Outline, z: f64, height: f64) -> GeometryResult<Brep> {
    let face =
        builder::try_attach_plane(&[outline.wire(z)]).map_err(GeometryError::modelling)?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// A cylinder along the Z axis.
///
/// Like [`Block`] before translation, a new cylinder is centred on the
/// origin in X and Y. Unlike a block it is also centred in Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    height: f64,
    radius: f64,
    centre: Point3,
}

impl Cylinder {
    /// Creates a cylinder of `height` and `radius` centred on the origin.
    #[must_use]
    pub fn new(height: f64, radius: f64) -> Self {
        Self {
            height,
            radius,
            centre: Point3::origin(),
        }
    }

    /// Moves the cylinder by `offset`.
    #[must_use]
    pub fn translate(mut self, offset: Vector3) -> Self {
        self.centre += offset;
        self
    }

    /// Cylinder height.
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Cylinder radius.
    #[must_use]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    /// Centre of the cylinder (midway between its end faces).
    #[must_use]
    pub const fn centre(&self) -> Point3 {
        self.centre
    }

    /// Z coordinates of the bottom and top faces.
    #[must_use]
    pub fn z_range(&self) -> (f64, f64) {
        let half = self.height / 2.0;
        (self.centre.z - half, self.centre.z + half)
    }

    /// Axis-aligned bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let half = Vector3::new(self.radius, self.radius, self.height / 2.0);
        BoundingBox {
            min: self.centre - half,
            max: self.centre + half,
        }
    }

    /// Checks the dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the height or radius is not positive.
    pub fn validate(&self) -> GeometryResult<()> {
        ensure_positive("height", self.height)?;
        ensure_positive("radius", self.radius)
    }

    /// Builds the cylinder as a solid.
    ///
    /// # Errors
    ///
    /// See [`Cylinder::validate`] and [`Tessellation::validate`].
    pub fn build(&self, tessellation: &Tessellation) -> GeometryResult<Solid> {
        tessellation.validate()?;
        let brep = self.brep()?;
        Ok(Body::new(brep, self.bounding_box(), None).into())
    }

    /// Exact B-rep: a full circle swept into a disc, then extruded.
    pub(crate) fn brep(&self) -> GeometryResult<Brep> {
        self.validate()?;
        let (bottom, _) = self.z_range();
        let axis = Point3::new(self.centre.x, self.centre.y, bottom);
        let rim = builder::vertex(axis + Vector3::new(self.radius, 0.0, 0.0));
        let circle: Wire = builder::rsweep(&rim, axis, Vector3::unit_z(), Rad(TAU));
        let disc = builder::try_attach_plane(&[circle]).map_err(GeometryError::modelling)?;
        Ok(builder::tsweep(&disc, Vector3::new(0.0, 0.0, self.height)))
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use truck_modeling::InnerSpace;

    use super::*;

    const FINE: Tessellation = Tessellation::new(16, 0.001);

    #[test]
    fn plain_block_volume_and_extent() {
        let solid = Block::new(2.0, 3.0, 4.0).build(&FINE).unwrap();
        assert!(solid.is_closed());
        assert!((solid.volume(&FINE) - 24.0).abs() < 1e-6);

        let bbox = solid.bounding_box();
        assert!((bbox.min - Point3::new(-1.0, -1.5, 0.0)).magnitude() < 1e-12);
        assert!((bbox.max - Point3::new(1.0, 1.5, 4.0)).magnitude() < 1e-12);
    }

    #[test]
    fn rounded_block_keeps_outer_extent() {
        let solid = Block::new(10.0, 10.0, 4.1)
            .fillet_vertical_edges(0.5)
            .build(&FINE)
            .unwrap();
        assert!(solid.is_closed());

        let size = solid.bounding_box().size();
        assert!((size - Vector3::new(10.0, 10.0, 4.1)).magnitude() < 1e-12);

        let exact = (100.0 - (4.0 - PI) * 0.25) * 4.1;
        assert!((solid.volume(&FINE) - exact).abs() < 0.01);
    }

    #[test]
    fn top_fillet_removes_material() {
        let vertical_only = Block::new(12.5, 12.5, 8.0)
            .fillet_vertical_edges(0.8)
            .build(&FINE)
            .unwrap();
        let both = Block::new(12.5, 12.5, 8.0)
            .fillet_vertical_edges(0.8)
            .fillet_top_edges(0.5)
            .build(&FINE)
            .unwrap();
        assert!(both.is_closed());
        let size = both.bounding_box().size();
        assert!((size - Vector3::new(12.5, 12.5, 8.0)).magnitude() < 1e-12);

        // Removed rim: a (1 - pi/4) r^2 cross-section swept along the four
        // straight sides plus one full revolution (Pappus) around the corners.
        let (r, corner): (f64, f64) = (0.5, 0.8);
        let section = (1.0 - PI / 4.0) * r * r;
        let centroid = (corner - r) + 2.0 * r / (3.0 * (4.0 - PI));
        let removed = section * 4.0f64.mul_add(12.5 - 2.0 * corner, 2.0 * PI * centroid);
        let delta = vertical_only.volume(&FINE) - both.volume(&FINE);
        assert!((delta - removed).abs() < 0.05, "removed {delta}, expected {removed}");
    }

    #[test]
    fn oversized_vertical_fillet_rejected() {
        let result = Block::new(2.0, 4.0, 1.0).fillet_vertical_edges(1.0).build(&FINE);
        assert!(matches!(result, Err(GeometryError::FilletTooLarge { .. })));
    }

    #[test]
    fn top_fillet_needs_larger_vertical_fillet() {
        let result = Block::new(5.0, 5.0, 5.0)
            .fillet_vertical_edges(0.5)
            .fillet_top_edges(0.5)
            .build(&FINE);
        assert!(matches!(result, Err(GeometryError::FilletTooLarge { .. })));

        let result = Block::new(5.0, 5.0, 5.0).fillet_top_edges(0.5).build(&FINE);
        assert!(matches!(result, Err(GeometryError::FilletTooLarge { .. })));
    }

    #[test]
    fn non_positive_dimension_rejected() {
        let result = Block::new(0.0, 1.0, 1.0).build(&FINE);
        assert!(matches!(
            result,
            Err(GeometryError::InvalidDimension { name: "width", .. })
        ));
    }

    #[test]
    fn cylinder_solid() {
        let cylinder = Cylinder::new(0.05, 0.4).translate(Vector3::new(-3.5, 3.5, 4.125));
        let solid = cylinder.build(&FINE).unwrap();
        assert!(solid.is_closed());

        let bbox = solid.bounding_box();
        assert!((bbox.min.z - 4.1).abs() < 1e-12);
        assert!((bbox.max.z - 4.15).abs() < 1e-12);
        assert!((bbox.size().y - 0.8).abs() < 1e-12);
        assert!((bbox.centre() - Point3::new(-3.5, 3.5, 4.125)).magnitude() < 1e-9);

        let exact = PI * 0.4 * 0.4 * 0.05;
        assert!((solid.volume(&FINE) - exact).abs() / exact < 0.01);
    }

    #[test]
    fn pocket_cut() {
        let body = Block::new(12.5, 12.5, 8.0)
            .fillet_vertical_edges(0.8)
            .fillet_top_edges(0.5)
            .build(&FINE)
            .unwrap();
        let before = body.volume(&FINE);
        let tool = Cylinder::new(0.3, 5.0).translate(Vector3::new(0.0, 0.0, 7.9));

        let cut = body.cut(&tool, &Tessellation::DEFAULT).unwrap();
        assert!(cut.is_closed());
        assert_eq!(cut.bodies().len(), 1);

        let removed = PI * 25.0 * 0.25;
        let delta = before - cut.volume(&FINE);
        assert!((delta - removed).abs() / removed < 0.02);
        let size = cut.bounding_box().size();
        assert!((size - Vector3::new(12.5, 12.5, 8.0)).magnitude() < 1e-12);
    }

    #[test]
    fn cut_flush_with_top_face_rejected() {
        let body = Block::new(4.0, 4.0, 2.0).build(&FINE).unwrap();
        let tool = Cylinder::new(0.5, 1.0).translate(Vector3::new(0.0, 0.0, 1.75));
        assert!(matches!(
            body.cut(&tool, &FINE),
            Err(GeometryError::UnsupportedCut { .. })
        ));
    }

    #[test]
    fn cut_leaving_top_face_rejected() {
        let body = Block::new(4.0, 4.0, 2.0).build(&FINE).unwrap();
        let tool = Cylinder::new(1.0, 1.5).translate(Vector3::new(1.0, 0.0, 2.0));
        assert!(matches!(
            body.cut(&tool, &FINE),
            Err(GeometryError::UnsupportedCut { .. })
        ));
    }

    #[test]
    fn cut_through_bottom_rejected() {
        let body = Block::new(4.0, 4.0, 2.0).build(&FINE).unwrap();
        let tool = Cylinder::new(5.0, 1.0).translate(Vector3::new(0.0, 0.0, 2.0));
        assert!(matches!(
            body.cut(&tool, &FINE),
            Err(GeometryError::UnsupportedCut { .. })
        ));
    }

    #[test]
    fn internal_cut_rejected() {
        let body = Block::new(4.0, 4.0, 2.0).build(&FINE).unwrap();
        let tool = Cylinder::new(0.5, 1.0).translate(Vector3::new(0.0, 0.0, 1.0));
        assert!(matches!(
            body.cut(&tool, &FINE),
            Err(GeometryError::UnsupportedCut { .. })
        ));
    }

    #[test]
    fn cut_into_cylinder_rejected() {
        let disc = Cylinder::new(1.0, 2.0).build(&FINE).unwrap();
        let tool = Cylinder::new(1.0, 0.5).translate(Vector3::new(0.0, 0.0, 0.5));
        assert!(matches!(
            disc.cut(&tool, &FINE),
            Err(GeometryError::UnsupportedCut { .. })
        ));
    }

    #[test]
    fn cut_missing_body_is_noop() {
        let body = Block::new(4.0, 4.0, 2.0).build(&FINE).unwrap();
        let before = body.volume(&FINE);
        let tool = Cylinder::new(1.0, 1.0).translate(Vector3::new(10.0, 0.0, 2.0));
        let cut = body.cut(&tool, &FINE).unwrap();
        assert_eq!(cut.bodies().len(), 1);
        assert!((cut.volume(&FINE) - before).abs() < 1e-9);
    }
}
