//! Component body geometry.

use crate::geometry::{Block, Cylinder, GeometryResult, Solid, Tessellation, Vector3};

/// Extra tool height above the top face so the marking cut opens cleanly.
const MARKING_OVERCUT: f64 = 0.1;

/// Shallow circular indent on the top face, centred on the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marking {
    /// Indent radius (mm).
    pub radius: f64,
    /// Nominal indent depth (mm).
    pub depth: f64,
}

/// Body outline from the datasheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    /// Body size along X (mm).
    pub width: f64,
    /// Body size along Y (mm).
    pub length: f64,
    /// Body height (mm).
    pub height: f64,
    /// Radius of the four vertical edges (mm).
    pub corner_radius: f64,
    /// Radius of the top face edges, if rounded (mm).
    pub top_fillet: Option<f64>,
    /// Marking indent on the top face, if any.
    pub marking: Option<Marking>,
}

impl BodySpec {
    /// The cylinder cut from the top face for the marking.
    ///
    /// The tool is `depth + 0.1` tall and centred half the depth below the
    /// top face, so the floor ends 0.05 mm deeper than the nominal depth.
    #[must_use]
    pub fn marking_tool(&self) -> Option<Cylinder> {
        self.marking.map(|marking| {
            Cylinder::new(marking.depth + MARKING_OVERCUT, marking.radius)
                .translate(Vector3::new(0.0, 0.0, self.height - marking.depth / 2.0))
        })
    }
}

/// Builds the body: a rounded block resting on Z=0, optionally with rounded
/// top edges and a marking indent.
///
/// # Errors
///
/// Returns an error if the dimensions do not describe a valid solid.
pub fn body(spec: &BodySpec, tessellation: &Tessellation) -> GeometryResult<Solid> {
    let mut block = Block::new(spec.width, spec.length, spec.height)
        .fillet_vertical_edges(spec.corner_radius);
    if let Some(radius) = spec.top_fillet {
        block = block.fillet_top_edges(radius);
    }

    let solid = block.build(tessellation)?;
    match spec.marking_tool() {
        Some(tool) => solid.cut(&tool, tessellation),
        None => Ok(solid),
    }
}

#[cfg(test)]
mod tests {
    use truck_modeling::InnerSpace;

    use super::*;

    const PLAIN: BodySpec = BodySpec {
        width: 10.0,
        length: 8.0,
        height: 3.0,
        corner_radius: 0.5,
        top_fillet: None,
        marking: None,
    };

    #[test]
    fn plain_body() {
        let solid = body(&PLAIN, &Tessellation::default()).unwrap();
        assert_eq!(solid.bodies().len(), 1);
        assert!(solid.is_closed());
        let bbox = solid.bounding_box();
        assert!(bbox.min.z.abs() < 1e-12);
        assert!((bbox.size() - Vector3::new(10.0, 8.0, 3.0)).magnitude() < 1e-9);
    }

    #[test]
    fn marking_tool_position() {
        let spec = BodySpec {
            top_fillet: Some(0.25),
            marking: Some(Marking {
                radius: 2.0,
                depth: 0.2,
            }),
            ..PLAIN
        };
        let tool = spec.marking_tool().unwrap();
        let (bottom, top) = tool.z_range();
        assert!((bottom - 2.75).abs() < 1e-12);
        assert!((top - 3.05).abs() < 1e-12);
        assert!((tool.radius() - 2.0).abs() < f64::EPSILON);
        assert!(PLAIN.marking_tool().is_none());
    }

    #[test]
    fn marked_body_is_closed() {
        let spec = BodySpec {
            top_fillet: Some(0.25),
            marking: Some(Marking {
                radius: 2.0,
                depth: 0.2,
            }),
            ..PLAIN
        };
        let tess = Tessellation::default();
        let marked = body(&spec, &tess).unwrap();
        let unmarked = body(&BodySpec { marking: None, ..spec }, &tess).unwrap();
        assert!(marked.is_closed());
        assert!(marked.volume(&tess) < unmarked.volume(&tess));
    }
}
