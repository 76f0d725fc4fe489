//! XRRF1280 SMD power inductor.

use tracing::debug;

use super::body::{body, BodySpec, Marking};
use super::marker::{pin1_marker, MarkerSpec};
use super::pads::{pads, PadPlacement, PadSize};
use super::ComponentModel;
use crate::geometry::Tessellation;
use crate::model::{Assembly, Color, ModelResult, Part};

pub(super) const BODY: BodySpec = BodySpec {
    width: 12.5,
    length: 12.5,
    height: 8.0,
    corner_radius: 0.8,
    top_fillet: Some(0.5),
    marking: Some(Marking {
        radius: 5.0,
        depth: 0.2,
    }),
};

pub(super) const PAD: PadSize = PadSize {
    width: 1.8,
    length: 5.0,
    height: 0.5,
};

pub(super) const PAD_LAYOUT: [PadPlacement; 4] = [
    PadPlacement::at(-1.715, -4.25),
    PadPlacement::at(1.715, -4.25),
    PadPlacement::at(1.715, 4.25),
    PadPlacement::at(-1.715, 4.25),
];

pub(super) const MARKER: MarkerSpec = MarkerSpec {
    radius: 0.4,
    thickness: 0.05,
    x: -4.5,
    y: -4.5,
    z: BODY.height + 0.01,
};

const BODY_COLOR: Color = Color::rgb(0.2, 0.18, 0.18);
const PAD_COLOR: Color = Color::rgb(0.85, 0.85, 0.85);

/// 12.5 x 12.5 mm shielded power inductor with a marked top face.
#[derive(Debug, Clone, Copy, Default)]
pub struct Xrrf1280;

impl ComponentModel for Xrrf1280 {
    fn name(&self) -> &'static str {
        "XRRF1280"
    }

    fn description(&self) -> &'static str {
        "SMD power inductor, 12.5 x 12.5 x 8.0 mm"
    }

    fn build(&self, tessellation: &Tessellation) -> ModelResult<Assembly> {
        debug!(component = self.name(), "Building model");
        let mut assembly = Assembly::new(self.name());
        assembly.add_part(Part::new("body", body(&BODY, tessellation)?).with_color(BODY_COLOR))?;
        assembly.add_part(
            Part::new("pads", pads(&PAD, &PAD_LAYOUT, tessellation)?).with_color(PAD_COLOR),
        )?;
        let marker = pin1_marker(&MARKER, tessellation)?;
        assembly.add_part(Part::new("pin1_marker", marker).with_color(Color::WHITE))?;
        Ok(assembly)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use truck_modeling::InnerSpace;

    use super::*;
    use crate::geometry::Vector3;

    fn assembly() -> Assembly {
        Xrrf1280.build(&Tessellation::default()).unwrap()
    }

    #[test]
    fn three_named_parts() {
        let names: Vec<_> = assembly().part_names().map(str::to_string).collect();
        assert_eq!(names, vec!["body", "pads", "pin1_marker"]);
    }

    #[test]
    fn body_has_marking_pocket() {
        let assembly = assembly();
        let solid = assembly.get("body").unwrap().solid();
        assert!(solid.is_closed());
        let bbox = solid.bounding_box();
        assert!((bbox.size() - Vector3::new(12.5, 12.5, 8.0)).magnitude() < 1e-9);

        // The pocket floor sits 0.25 mm below the top face.
        let tess = Tessellation::default();
        let unmarked = body(&BodySpec { marking: None, ..BODY }, &tess).unwrap();
        assert!(solid.bodies()[0].face_count() > unmarked.bodies()[0].face_count());
        let removed = unmarked.volume(&tess) - solid.volume(&tess);
        let pocket = PI * 5.0 * 5.0 * 0.25;
        assert!((removed - pocket).abs() / pocket < 0.02, "removed {removed}");
    }

    #[test]
    fn pads_at_datasheet_offsets() {
        let assembly = assembly();
        let pads = assembly.get("pads").unwrap();
        assert_eq!(pads.color(), PAD_COLOR);
        for (pad, placement) in pads.solid().bodies().iter().zip(&PAD_LAYOUT) {
            let bbox = pad.bounding_box();
            assert!((bbox.centre().x - placement.x).abs() < 1e-9);
            assert!((bbox.centre().y - placement.y).abs() < 1e-9);
            assert!((bbox.size() - Vector3::new(1.8, 5.0, 0.5)).magnitude() < 1e-9);
        }
    }

    #[test]
    fn marker_just_above_body() {
        let assembly = assembly();
        let bbox = assembly.get("pin1_marker").unwrap().solid().bounding_box();
        assert!((bbox.centre().z - 8.01).abs() < 1e-9);
        assert!((bbox.centre().x + 4.5).abs() < 1e-9);
    }
}
