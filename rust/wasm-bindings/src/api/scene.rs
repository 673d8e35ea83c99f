// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene objects, selection and transform edits

use super::ViewerAPI;
use crate::utils::{to_js_error, vec3};
use nalgebra::{Unit, Vector3};
use sceneview_geometry::{Mesh, Transform};
use sceneview_viewer::{DisplayToggle, ObjectId, SceneObject};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
impl ViewerAPI {
    /// Add a box of the given size. Returns the object id.
    #[wasm_bindgen(js_name = addBox)]
    pub fn add_box(
        &mut self,
        name: &str,
        width: f64,
        height: f64,
        depth: f64,
        position: Vec<f64>,
        rotation: Vec<f64>,
        scale: f64,
    ) -> Result<usize, JsValue> {
        let transform = Transform::from_parts(
            vec3(&position, "position")?,
            vec3(&rotation, "rotation")?,
            scale,
        );
        let object = SceneObject::new(name, Some(Mesh::cuboid(width, height, depth)))
            .with_transform(transform);
        let id = self.viewer.add_object(object).map_err(to_js_error)?;
        Ok(id.0)
    }

    /// Add an object from flat renderer buffers. Empty buffers add an object
    /// without geometry; empty normals are computed from the triangles.
    #[wasm_bindgen(js_name = addMesh)]
    pub fn add_mesh(
        &mut self,
        name: &str,
        positions: Vec<f32>,
        normals: Vec<f32>,
        indices: Vec<u32>,
    ) -> Result<usize, JsValue> {
        let mesh = if positions.is_empty() && indices.is_empty() {
            None
        } else {
            Some(Mesh::from_buffers(positions, normals, indices).map_err(to_js_error)?)
        };
        let id = self
            .viewer
            .add_object(SceneObject::new(name, mesh))
            .map_err(to_js_error)?;
        Ok(id.0)
    }

    /// Look up an object id by name
    #[wasm_bindgen(js_name = findObject)]
    pub fn find_object(&self, name: &str) -> Option<usize> {
        self.viewer.scene().find(name).ok().map(|id| id.0)
    }

    /// Number of objects in the scene
    #[wasm_bindgen(getter, js_name = objectCount)]
    pub fn object_count(&self) -> usize {
        self.viewer.scene().len()
    }

    /// World matrix of an object (column-major)
    #[wasm_bindgen(js_name = objectMatrix)]
    pub fn object_matrix(&self, id: usize) -> Option<Vec<f64>> {
        let object = self.viewer.scene().get(ObjectId(id))?;
        Some(super::column_major(&object.world_matrix()))
    }

    /// Select an object, or clear the selection with `undefined`
    pub fn select(&mut self, id: Option<usize>) -> Result<(), JsValue> {
        self.viewer.select(id.map(ObjectId)).map_err(to_js_error)
    }

    /// Currently selected object id
    #[wasm_bindgen(getter)]
    pub fn selected(&self) -> Option<usize> {
        self.viewer.selected().map(|id| id.0)
    }

    /// Object whose anchors pivot mode works on (defaults to the selection)
    #[wasm_bindgen(js_name = setPivotTarget)]
    pub fn set_pivot_target(&mut self, id: Option<usize>) -> Result<(), JsValue> {
        self.viewer
            .set_pivot_target(id.map(ObjectId))
            .map_err(to_js_error)
    }

    /// Color, opacity and edge settings for an object
    pub fn appearance(&self, id: usize) -> JsValue {
        self.viewer
            .appearance(ObjectId(id))
            .and_then(|appearance| serde_wasm_bindgen::to_value(&appearance).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Flip a display option by name. Returns the new value.
    pub fn toggle(&mut self, name: &str) -> Result<bool, JsValue> {
        let toggle = DisplayToggle::from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown display option: {}", name)))?;
        Ok(self.viewer.toggle(toggle))
    }

    /// Current display options as a JS object
    #[wasm_bindgen(js_name = displaySettings)]
    pub fn display_settings(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.viewer.display()).unwrap_or(JsValue::NULL)
    }

    /// Move the selection by a world-space offset (transform mode only)
    #[wasm_bindgen(js_name = translateSelected)]
    pub fn translate_selected(&mut self, dx: f64, dy: f64, dz: f64) -> bool {
        self.viewer.translate_selected(&Vector3::new(dx, dy, dz))
    }

    /// Rotate the selection about its pivot anchor (transform mode only)
    #[wasm_bindgen(js_name = rotateSelected)]
    pub fn rotate_selected(&mut self, ax: f64, ay: f64, az: f64, angle: f64) -> bool {
        let axis = Vector3::new(ax, ay, az);
        let Some(axis) = Unit::try_new(axis, 1e-12) else {
            return false;
        };
        self.viewer.rotate_selected(&axis, angle)
    }
}
