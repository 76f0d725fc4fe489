//! End-to-end tests for component model generation and STEP export.

use std::path::Path;

use yannlib_tools::components::{self, Bcohl1041, ComponentModel, Xrrf1280};
use yannlib_tools::geometry::{BoundingBox, Tessellation};
use yannlib_tools::model::Assembly;

/// Helper to compare floats with tolerance.
fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

const TOLERANCE: f64 = 1e-6;

fn assert_box(bbox: &BoundingBox, min: [f64; 3], max: [f64; 3]) {
    for axis in 0..3 {
        assert!(
            approx_eq(bbox.min[axis], min[axis], TOLERANCE),
            "min[{axis}] = {} expected {}",
            bbox.min[axis],
            min[axis]
        );
        assert!(
            approx_eq(bbox.max[axis], max[axis], TOLERANCE),
            "max[{axis}] = {} expected {}",
            bbox.max[axis],
            max[axis]
        );
    }
}

fn build(model: &dyn ComponentModel) -> Assembly {
    model
        .build(&Tessellation::default())
        .expect("Failed to build model")
}

/// Returns the DATA section of a STEP file.
fn data_section(step: &str) -> &str {
    let start = step.find("\nDATA;\n").expect("DATA section missing");
    &step[start..]
}

// =============================================================================
// Geometry
// =============================================================================

#[test]
fn bcohl1041_part_envelopes() {
    let assembly = build(&Bcohl1041);
    let names: Vec<_> = assembly.part_names().collect();
    assert_eq!(names, ["body", "pads", "marker"]);

    let body = assembly.get("body").unwrap().solid();
    assert_box(&body.bounding_box(), [-5.0, -5.0, 0.0], [5.0, 5.0, 4.1]);

    let pads = assembly.get("pads").unwrap().solid();
    assert_box(&pads.bounding_box(), [-3.5, -5.25, 0.0], [3.5, 5.25, 1.4]);

    let marker = assembly.get("marker").unwrap().solid();
    assert_box(&marker.bounding_box(), [-3.9, 3.1, 4.1], [-3.1, 3.9, 4.15]);
}

#[test]
fn xrrf1280_part_envelopes() {
    let assembly = build(&Xrrf1280);
    let names: Vec<_> = assembly.part_names().collect();
    assert_eq!(names, ["body", "pads", "pin1_marker"]);

    let body = assembly.get("body").unwrap().solid();
    assert_box(&body.bounding_box(), [-6.25, -6.25, 0.0], [6.25, 6.25, 8.0]);

    let pads = assembly.get("pads").unwrap().solid();
    assert_box(&pads.bounding_box(), [-2.615, -6.75, 0.0], [2.615, 6.75, 0.5]);

    let marker = assembly.get("pin1_marker").unwrap().solid();
    assert_box(&marker.bounding_box(), [-4.9, -4.9, 7.985], [-4.1, -4.1, 8.035]);
}

#[test]
fn every_body_is_closed() {
    for model in components::catalogue() {
        let assembly = build(model.as_ref());
        for part in assembly.parts() {
            for (index, body) in part.solid().bodies().iter().enumerate() {
                assert!(
                    body.is_closed(),
                    "{} / {} body {index} is not closed",
                    model.name(),
                    part.name()
                );
                assert!(body.volume(&Tessellation::default()) > 0.0);
            }
        }
    }
}

#[test]
fn pad_volumes_match_boxes() {
    let bcohl = build(&Bcohl1041);
    let volume = bcohl.get("pads").unwrap().solid().volume(&Tessellation::default());
    assert!(approx_eq(volume, 4.0 * 2.0 * 2.5 * 1.4, TOLERANCE));

    let xrrf = build(&Xrrf1280);
    let volume = xrrf.get("pads").unwrap().solid().volume(&Tessellation::default());
    assert!(approx_eq(volume, 4.0 * 1.8 * 5.0 * 0.5, TOLERANCE));
}

#[test]
fn pads_symmetric_about_origin() {
    for model in components::catalogue() {
        let assembly = build(model.as_ref());
        let centres: Vec<_> = assembly
            .get("pads")
            .unwrap()
            .solid()
            .bodies()
            .iter()
            .map(|body| body.bounding_box().centre())
            .collect();
        assert_eq!(centres.len(), 4);
        for centre in &centres {
            let mirrored = centres
                .iter()
                .any(|c| approx_eq(c.x, -centre.x, 1e-9) && approx_eq(c.y, -centre.y, 1e-9));
            assert!(mirrored, "{}: pad at {centre:?} has no mirror", model.name());
        }
    }
}

#[test]
fn coarser_tessellation_keeps_exact_envelopes() {
    let tessellation = Tessellation::new(2, 0.05);
    for model in components::catalogue() {
        let coarse = model.build(&tessellation).expect("Failed to build model");
        let fine = build(model.as_ref());
        for (coarse, fine) in coarse.parts().zip(fine.parts()) {
            assert!(coarse.solid().is_closed());
            let (a, b) = (coarse.solid().bounding_box(), fine.solid().bounding_box());
            assert_box(&a, b.min.into(), b.max.into());
        }
    }
}

// =============================================================================
// STEP export
// =============================================================================

#[test]
fn generated_files_land_in_models_dir() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let library = temp_dir.path();

    for model in components::catalogue() {
        let path = model.output_path(library);
        build(model.as_ref()).save(&path).expect("Failed to save");
        assert!(path.exists());
    }

    assert!(library.join("YannLib.3dmodels/BCOHL1041.step").is_file());
    assert!(library.join("YannLib.3dmodels/XRRF1280.step").is_file());
}

#[test]
fn step_contains_named_coloured_products() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = Xrrf1280.output_path(temp_dir.path());
    build(&Xrrf1280).save(&path).unwrap();

    let step = std::fs::read_to_string(&path).unwrap();
    assert!(step.starts_with("ISO-10303-21;"));
    assert!(step.contains("FILE_NAME('XRRF1280.step'"));
    for name in ["XRRF1280", "body", "pads", "pin1_marker"] {
        assert!(step.contains(&format!("PRODUCT('{name}','{name}'")), "{name}");
    }
    assert!(step.contains("COLOUR_RGB('',0.2,0.18,0.18)"));
    assert!(step.contains("COLOUR_RGB('',0.85,0.85,0.85)"));
    assert!(step.contains("COLOUR_RGB('',1.,1.,1.)"));
    // One body, four pads, one marker.
    assert_eq!(step.matches("MANIFOLD_SOLID_BREP(").count(), 6);
}

#[test]
fn regenerating_only_changes_header() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = Bcohl1041.output_path(temp_dir.path());

    build(&Bcohl1041).save(&path).unwrap();
    let first = std::fs::read_to_string(&path).unwrap();
    build(&Bcohl1041).save(&path).unwrap();
    let second = std::fs::read_to_string(&path).unwrap();

    assert_eq!(data_section(&first), data_section(&second));
}

#[test]
fn save_overwrites_existing_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = components::output_path(temp_dir.path(), "BCOHL1041");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "stale").unwrap();

    build(&Bcohl1041).save(&path).unwrap();
    let step = std::fs::read_to_string(&path).unwrap();
    assert!(step.ends_with("END-ISO-10303-21;\n"));
    assert!(!step.contains("stale"));
}

#[test]
fn output_path_is_relative_to_library() {
    let path = components::output_path(Path::new("libs/YannLib"), "XRRF1280");
    assert_eq!(path, Path::new("libs/YannLib/YannLib.3dmodels/XRRF1280.step"));
}
