//! Multi-body solids on top of truck B-reps.
//!
//! A [`Body`] is one closed truck solid together with its analytic bounding
//! box and, for blocks, the outline of its planar top face. A [`Solid`]
//! groups disjoint bodies, which is all the pad union needs.

use tracing::debug;
use truck_meshalgo::prelude::*;
use truck_modeling::{builder, EuclideanSpace, InnerSpace, Solid as Brep};
use truck_polymesh::PolygonMesh;
use truck_topology::shell::ShellCondition;

use super::error::{GeometryError, GeometryResult};
use super::outline::Outline;
use super::primitives::Cylinder;
use super::{BoundingBox, Tessellation, Vector3, TOLERANCE};

/// Planar top face of a body: its outline and height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TopFace {
    pub(crate) outline: Outline,
    pub(crate) z: f64,
}

/// A single closed B-rep.
#[derive(Debug, Clone)]
pub struct Body {
    brep: Brep,
    bounds: BoundingBox,
    top: Option<TopFace>,
}

impl Body {
    pub(crate) const fn new(brep: Brep, bounds: BoundingBox, top: Option<TopFace>) -> Self {
        Self { brep, bounds, top }
    }

    /// The truck solid.
    #[must_use]
    pub const fn brep(&self) -> &Brep {
        &self.brep
    }

    /// Axis-aligned bounding box.
    #[must_use]
    pub const fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    /// Number of faces over all shells.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.brep.boundaries().iter().map(|shell| shell.len()).sum()
    }

    /// Returns `true` if every shell is closed and consistently oriented.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.brep
            .boundaries()
            .iter()
            .all(|shell| shell.shell_condition() == ShellCondition::Closed)
    }

    /// Enclosed volume (mm³), measured on a mesh of the B-rep.
    #[must_use]
    pub fn volume(&self, tessellation: &Tessellation) -> f64 {
        let tolerance = tessellation.mesh_tolerance;
        self.brep
            .compress()
            .boundaries
            .iter()
            .map(|shell| mesh_volume(&shell.robust_triangulation(tolerance).to_polygon()))
            .sum()
    }

    fn translate(&mut self, offset: Vector3) {
        self.brep = builder::translated(&self.brep, offset);
        self.bounds = self.bounds.translated(offset);
        if let Some(top) = &mut self.top {
            top.outline = top.outline.translated(offset.x, offset.y);
            top.z += offset.z;
        }
    }

    /// Cuts a blind cylindrical pocket down from the top face.
    fn pocket(&mut self, tool: &Cylinder, tessellation: &Tessellation) -> GeometryResult<()> {
        let top = self
            .top
            .ok_or_else(|| GeometryError::unsupported_cut("body has no planar top face"))?;
        let (floor, tool_top) = tool.z_range();
        if tool_top <= top.z + TOLERANCE {
            return Err(GeometryError::unsupported_cut(
                "tool top must clear the body top face",
            ));
        }
        if floor <= self.bounds.min.z + TOLERANCE {
            return Err(GeometryError::unsupported_cut(
                "tool reaches through the body bottom",
            ));
        }
        let centre = tool.centre();
        if !top.outline.contains_circle(centre.x, centre.y, tool.radius()) {
            return Err(GeometryError::unsupported_cut(
                "tool circle leaves the top face",
            ));
        }

        let mut cutter = tool.brep()?;
        cutter.not();
        self.brep = truck_shapeops::and(&self.brep, &cutter, tessellation.mesh_tolerance)
            .ok_or(GeometryError::BooleanFailed { operation: "cut" })?;

        debug!(radius = tool.radius(), floor, faces = self.face_count(), "Cut pocket");
        Ok(())
    }
}

/// Signed volume of a closed, outward-oriented mesh.
fn mesh_volume(mesh: &PolygonMesh) -> f64 {
    let positions = mesh.positions();
    let tetra = |a: usize, b: usize, c: usize| {
        let (a, b, c) = (positions[a].to_vec(), positions[b].to_vec(), positions[c].to_vec());
        a.dot(b.cross(c))
    };

    let triangles: f64 = mesh
        .tri_faces()
        .iter()
        .map(|f| tetra(f[0].pos, f[1].pos, f[2].pos))
        .sum();
    let quads: f64 = mesh
        .quad_faces()
        .iter()
        .map(|f| tetra(f[0].pos, f[1].pos, f[2].pos) + tetra(f[0].pos, f[2].pos, f[3].pos))
        .sum();
    let polygons: f64 = mesh
        .other_faces()
        .iter()
        .map(|f| {
            (1..f.len() - 1)
                .map(|k| tetra(f[0].pos, f[k].pos, f[k + 1].pos))
                .sum::<f64>()
        })
        .sum();
    (triangles + quads + polygons) / 6.0
}

/// A solid made of one or more disjoint bodies.
#[derive(Debug, Clone)]
pub struct Solid {
    bodies: Vec<Body>,
}

impl From<Body> for Solid {
    fn from(body: Body) -> Self {
        Self { bodies: vec![body] }
    }
}

impl Solid {
    /// Bodies in creation order.
    #[must_use]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Moves the solid by `offset`.
    #[must_use]
    pub fn translate(mut self, offset: Vector3) -> Self {
        for body in &mut self.bodies {
            body.translate(offset);
        }
        self
    }

    /// Combines two solids into one multi-body solid.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::OverlappingUnion`] if the bounding box of any
    /// body of `other` shares volume with one of `self`; only disjoint (or
    /// touching) bodies can be combined.
    pub fn union(mut self, other: Self) -> GeometryResult<Self> {
        for body in &self.bodies {
            if other
                .bodies
                .iter()
                .any(|candidate| body.bounds.overlaps(&candidate.bounds))
            {
                return Err(GeometryError::OverlappingUnion);
            }
        }
        self.bodies.extend(other.bodies);
        Ok(self)
    }

    /// Subtracts a Z-axis cylinder from the solid.
    ///
    /// Every body the tool reaches must receive a blind pocket: the tool's
    /// top must clear the body's planar top face, its bottom must stay above
    /// the body's bottom, and its circle must lie strictly inside the top
    /// face. Bodies the tool misses are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool is invalid, the cut does not form such a
    /// pocket, or the boolean operation fails.
    pub fn cut(mut self, tool: &Cylinder, tessellation: &Tessellation) -> GeometryResult<Self> {
        tool.validate()?;
        tessellation.validate()?;
        let tool_box = tool.bounding_box();

        let mut touched = 0;
        for body in &mut self.bodies {
            if body.bounds.overlaps(&tool_box) {
                body.pocket(tool, tessellation)?;
                touched += 1;
            }
        }
        if touched == 0 {
            debug!("Cut tool misses every body");
        }
        Ok(self)
    }

    /// Bounding box of all bodies.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bodies
            .iter()
            .fold(BoundingBox::empty(), |acc, body| acc.merged(&body.bounds))
    }

    /// Total enclosed volume (mm³).
    #[must_use]
    pub fn volume(&self, tessellation: &Tessellation) -> f64 {
        self.bodies.iter().map(|body| body.volume(tessellation)).sum()
    }

    /// Returns `true` if every body is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.bodies.iter().all(Body::is_closed)
    }
}
