//! BCOHL1041 SMD coupled inductor.

use tracing::debug;

use super::body::{body, BodySpec};
use super::marker::{pin1_marker, MarkerSpec};
use super::pads::{pads, PadPlacement, PadSize};
use super::ComponentModel;
use crate::geometry::Tessellation;
use crate::model::{Assembly, Color, ModelResult, Part};

pub(super) const BODY: BodySpec = BodySpec {
    width: 10.0,
    length: 10.0,
    height: 4.1,
    corner_radius: 0.5,
    top_fillet: None,
    marking: None,
};

pub(super) const PAD: PadSize = PadSize {
    width: 2.0,
    length: 2.5,
    height: 1.4,
};

// Pin order: 1 top-left, then clockwise.
pub(super) const PAD_LAYOUT: [PadPlacement; 4] = [
    PadPlacement::at(-2.5, 4.0),
    PadPlacement::at(2.5, 4.0),
    PadPlacement::at(2.5, -4.0),
    PadPlacement::at(-2.5, -4.0),
];

pub(super) const MARKER: MarkerSpec = MarkerSpec {
    radius: 0.4,
    thickness: 0.05,
    x: -3.5,
    y: 3.5,
    z: BODY.height + 0.025,
};

const BODY_COLOR: Color = Color::rgb(0.23, 0.2, 0.2);
const PAD_COLOR: Color = Color::rgb(0.8, 0.8, 0.8);

/// 10 x 10 mm coupled inductor with four corner pads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bcohl1041;

impl ComponentModel for Bcohl1041 {
    fn name(&self) -> &'static str {
        "BCOHL1041"
    }

    fn description(&self) -> &'static str {
        "SMD coupled inductor, 10.0 x 10.0 x 4.1 mm"
    }

    fn build(&self, tessellation: &Tessellation) -> ModelResult<Assembly> {
        debug!(component = self.name(), "Building model");
        let mut assembly = Assembly::new(self.name());
        assembly.add_part(Part::new("body", body(&BODY, tessellation)?).with_color(BODY_COLOR))?;
        assembly.add_part(
            Part::new("pads", pads(&PAD, &PAD_LAYOUT, tessellation)?).with_color(PAD_COLOR),
        )?;
        assembly.add_part(
            Part::new("marker", pin1_marker(&MARKER, tessellation)?).with_color(Color::WHITE),
        )?;
        Ok(assembly)
    }
}

#[cfg(test)]
mod tests {
    use truck_modeling::InnerSpace;

    use super::*;
    use crate::geometry::Vector3;

    fn assembly() -> Assembly {
        Bcohl1041.build(&Tessellation::default()).unwrap()
    }

    #[test]
    fn three_named_parts() {
        let names: Vec<_> = assembly().part_names().map(str::to_string).collect();
        assert_eq!(names, vec!["body", "pads", "marker"]);
    }

    #[test]
    fn body_envelope() {
        let assembly = assembly();
        let body = assembly.get("body").unwrap();
        assert_eq!(body.color(), BODY_COLOR);
        let bbox = body.solid().bounding_box();
        assert!((bbox.size() - Vector3::new(10.0, 10.0, 4.1)).magnitude() < 1e-9);
        assert!(bbox.centre().x.abs() < 1e-9);
        assert!(bbox.centre().y.abs() < 1e-9);
        assert!(body.solid().is_closed());
    }

    #[test]
    fn pads_at_datasheet_offsets() {
        let assembly = assembly();
        let pads = assembly.get("pads").unwrap();
        assert_eq!(pads.solid().bodies().len(), 4);
        for (pad, placement) in pads.solid().bodies().iter().zip(&PAD_LAYOUT) {
            let bbox = pad.bounding_box();
            assert!((bbox.centre().x - placement.x).abs() < 1e-9);
            assert!((bbox.centre().y - placement.y).abs() < 1e-9);
            assert!((bbox.size() - Vector3::new(2.0, 2.5, 1.4)).magnitude() < 1e-9);
        }
        // Pads are symmetric about the origin.
        let bbox = pads.solid().bounding_box();
        assert!(bbox.centre().x.hypot(bbox.centre().y) < 1e-9);
    }

    #[test]
    fn marker_on_top_face() {
        let assembly = assembly();
        let marker = assembly.get("marker").unwrap();
        assert_eq!(marker.color(), Color::WHITE);
        let bbox = marker.solid().bounding_box();
        assert!((bbox.min.z - 4.1).abs() < 1e-9);
        assert!((bbox.max.z - 4.15).abs() < 1e-9);
    }

    #[test]
    fn marker_extent_exact_at_coarse_tessellation() {
        let coarse = Bcohl1041.build(&Tessellation::new(1, 0.2)).unwrap();
        let bbox = coarse.get("marker").unwrap().solid().bounding_box();
        assert!((bbox.size() - Vector3::new(0.8, 0.8, 0.05)).magnitude() < 1e-12);
        assert!((bbox.centre().x + 3.5).abs() < 1e-12);
        assert!((bbox.centre().y - 3.5).abs() < 1e-12);
    }
}
