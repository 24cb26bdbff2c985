//! Browser tests for the JS-facing API.
//!
//! Run with `wasm-pack test --headless --firefox packages/wasm`.

#![cfg(target_arch = "wasm32")]

use mesh_inflate_wasm::MeshInflationWasm;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

// Regular octahedron as a triangle soup, one vertex per face corner
fn octahedron_soup() -> (Vec<f32>, Vec<u32>) {
    let corners = [
        [0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, -1.0, 0.0, 0.0, 0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, -1.0, 0.0, -1.0, 0.0, -1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 1.0, 0.0, 0.0, 0.0, -1.0, 0.0],
    ];
    let positions: Vec<f32> = corners.iter().flatten().copied().collect();
    let indices = (0..24).collect();
    (positions, indices)
}

fn params(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap()
}

#[wasm_bindgen_test]
fn load_welds_soup() {
    let (positions, indices) = octahedron_soup();
    let mut viewer = MeshInflationWasm::new();
    viewer.load_mesh(&positions, &indices).unwrap();

    assert_eq!(viewer.vertex_count(), 6);
    assert_eq!(viewer.edge_count(), 12);
    assert_eq!(viewer.get_positions_view().length(), 18);
    assert_eq!(viewer.get_face_normals_view().length(), 24);
    assert_eq!(viewer.get_indices_view().length(), 24);
}

#[wasm_bindgen_test]
fn load_without_welding() {
    let (positions, indices) = octahedron_soup();
    let mut viewer = MeshInflationWasm::new();
    viewer
        .load_mesh_with_config(&positions, &indices, params(r#"{"weldTolerance": null}"#))
        .unwrap();

    assert_eq!(viewer.vertex_count(), 24);
    assert_eq!(viewer.edge_count(), 24);
}

#[wasm_bindgen_test]
fn rejects_bad_buffers() {
    let mut viewer = MeshInflationWasm::new();
    assert!(viewer.load_mesh(&[0.0, 0.0], &[0, 1, 2]).is_err());
    assert!(viewer.load_mesh(&[0.0; 9], &[0, 1, 3]).is_err());
}

#[wasm_bindgen_test]
fn step_before_load_fails() {
    let mut viewer = MeshInflationWasm::new();
    let err = viewer.step(0.1, 0.005, 0.8).unwrap_err();

    assert!(err.as_string().unwrap().contains("not ready"));
}

#[wasm_bindgen_test]
fn rejects_invalid_params() {
    let mut viewer = MeshInflationWasm::new();
    viewer.load_icosphere(1.0, 1);

    assert!(viewer.step(-1.0, 0.005, 0.8).is_err());
    assert!(viewer.set_params(params(r#"{"damping": -0.5}"#)).is_err());
    assert!(viewer.set_params(params(r#"{"degenerateEdges": "explode"}"#)).is_err());
}

#[wasm_bindgen_test]
fn tick_inflates_when_running() {
    let mut viewer = MeshInflationWasm::new();
    viewer.load_icosphere(1.0, 2);
    viewer.set_params(params(r#"{"amplitude": 0.01}"#)).unwrap();
    let radius = viewer.get_bounding_sphere().unwrap()[3];

    assert!(!viewer.tick().unwrap());
    viewer.start();
    for _ in 0..30 {
        assert!(viewer.tick().unwrap());
    }

    assert!(viewer.bounds_stale());
    assert!(viewer.get_bounding_sphere().unwrap()[3] > radius);
    assert_eq!(viewer.frame_count(), 30.0);
}

#[wasm_bindgen_test]
fn mesh_report_is_closed() {
    let mut viewer = MeshInflationWasm::new();
    assert!(viewer.mesh_report().is_err());

    viewer.load_icosphere(1.0, 1);
    let report = viewer.mesh_report().unwrap();
    let closed = js_sys::Reflect::get(&report, &JsValue::from_str("isClosed")).unwrap();

    assert_eq!(closed.as_bool(), Some(true));
}

#[wasm_bindgen_test]
fn abort_policy_surfaces_degenerate_edge() {
    let mut viewer = MeshInflationWasm::new();
    // Two triangles sharing an edge, first two corners coincide
    viewer
        .load_mesh_with_config(
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0],
            &[0, 1, 2, 1, 3, 2],
            params(r#"{"weldTolerance": null, "center": false}"#),
        )
        .unwrap();

    assert_eq!(viewer.step(0.1, 0.0, 0.8).unwrap(), 1);
    let err = viewer
        .step_with_params(params(r#"{"degenerateEdges": "abort"}"#))
        .unwrap_err();
    assert!(err.as_string().unwrap().contains("Degenerate edge"));
}
