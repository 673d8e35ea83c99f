// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![cfg(target_arch = "wasm32")]

use sceneview_wasm::ViewerAPI;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn viewer_with_box() -> ViewerAPI {
    let mut api = ViewerAPI::new(800.0, 600.0, JsValue::UNDEFINED).unwrap();
    let id = api
        .add_box("box", 2.0, 2.0, 2.0, vec![0.0; 3], vec![0.0; 3], 1.0)
        .unwrap();
    api.select(Some(id)).unwrap();
    api
}

#[wasm_bindgen_test]
fn fit_to_screen_returns_result() {
    let mut api = viewer_with_box();
    let fit = api.fit_to_screen();
    assert!(!fit.is_null());
    assert_eq!(api.camera_target(), vec![0.0, 0.0, 0.0]);
}

#[wasm_bindgen_test]
fn fit_without_target_is_null() {
    let mut api = ViewerAPI::new(800.0, 600.0, JsValue::NULL).unwrap();
    assert!(api.fit_to_screen().is_null());
}

#[wasm_bindgen_test]
fn escape_leaves_pivot_mode() {
    let mut api = viewer_with_box();
    assert!(api.begin_pivot_change());
    assert!(api.is_changing_pivot());
    assert!(api.key_down("Escape"));
    assert!(!api.is_changing_pivot());
    assert_eq!(api.pivot_index(), 0);
}

#[wasm_bindgen_test]
fn rejects_bad_vectors_and_sizes() {
    assert!(ViewerAPI::new(0.0, 600.0, JsValue::UNDEFINED).is_err());
    let mut api = viewer_with_box();
    assert!(api
        .add_box("short", 1.0, 1.0, 1.0, vec![0.0; 2], vec![0.0; 3], 1.0)
        .is_err());
    assert!(api.apply_preset("sideways").is_err());
}

#[wasm_bindgen_test]
fn anchors_and_matrices_are_exposed() {
    let api = viewer_with_box();
    assert_eq!(js_sys::Array::from(&api.pivot_anchors()).length(), 27);
    assert_eq!(api.view_matrix().len(), 16);
    assert_eq!(api.pivot_world_position(), Some(vec![0.0, 0.0, 0.0]));
}

#[wasm_bindgen_test]
fn add_mesh_validates_buffers() {
    let mut api = viewer_with_box();
    let triangle = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];

    assert!(api
        .add_mesh("out_of_range", vec![0.0; 3], vec![0.0, 0.0, 1.0], vec![0, 0, 9])
        .is_err());
    assert!(api
        .add_mesh("short_normals", triangle.clone(), vec![0.0, 0.0, 1.0], vec![0, 1, 2])
        .is_err());
    assert_eq!(api.object_count(), 1);

    assert!(api.add_mesh("triangle", triangle, Vec::new(), vec![0, 1, 2]).is_ok());
    assert_eq!(api.object_count(), 2);
}
