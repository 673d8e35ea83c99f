// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Camera, orbit controls, presets and fit-to-screen

use super::{column_major, point_to_vec, ViewerAPI};
use crate::utils::{to_js_error, warn};
use sceneview_viewer::ViewPreset;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Result of a fit, as handed to JS
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FitJs {
    center: Vec<f64>,
    distance: f64,
    camera_position: Vec<f64>,
}

#[wasm_bindgen]
impl ViewerAPI {
    /// Frame the pivot target, the selection, or the whole scene.
    ///
    /// Returns `{ center, distance, cameraPosition }`, or `null` (with a
    /// console warning) when there is nothing to frame.
    #[wasm_bindgen(js_name = fitToScreen)]
    pub fn fit_to_screen(&mut self) -> JsValue {
        match self.viewer.fit_to_screen() {
            Ok(outcome) => {
                let fit = FitJs {
                    center: point_to_vec(&outcome.center),
                    distance: outcome.distance,
                    camera_position: point_to_vec(&outcome.camera_position),
                };
                serde_wasm_bindgen::to_value(&fit).unwrap_or(JsValue::NULL)
            }
            Err(e) => {
                warn(&format!("fit to screen skipped: {}", e));
                JsValue::NULL
            }
        }
    }

    /// Resize the canvas
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.viewer.resize(width, height).map_err(to_js_error)
    }

    /// Move to a named preset (`front`, `back`, `left`, `right`, `top`, `bottom`, `iso`)
    #[wasm_bindgen(js_name = applyPreset)]
    pub fn apply_preset(&mut self, name: &str) -> Result<(), JsValue> {
        let preset = ViewPreset::from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown view preset: {}", name)))?;
        self.viewer.apply_preset(preset);
        Ok(())
    }

    /// Handle a `KeyboardEvent.key`. Returns whether the key was bound.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str) -> bool {
        self.viewer.key_down(key)
    }

    #[wasm_bindgen(js_name = setOrthographic)]
    pub fn set_orthographic(&mut self, orthographic: bool) {
        self.viewer.set_orthographic(orthographic);
    }

    #[wasm_bindgen(getter, js_name = isOrthographic)]
    pub fn is_orthographic(&self) -> bool {
        self.viewer.camera().is_orthographic()
    }

    /// Orbit by a pointer drag in pixels
    pub fn orbit(&mut self, dx: f64, dy: f64) {
        self.viewer.orbit(dx, dy);
    }

    /// Pan by a pointer drag in pixels
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.viewer.pan(dx, dy);
    }

    /// Zoom by a wheel `deltaY`
    pub fn zoom(&mut self, delta_y: f64) {
        self.viewer.zoom(delta_y);
    }

    #[wasm_bindgen(js_name = cameraPosition)]
    pub fn camera_position(&self) -> Vec<f64> {
        point_to_vec(&self.viewer.camera().position)
    }

    /// Orbit target
    #[wasm_bindgen(js_name = cameraTarget)]
    pub fn camera_target(&self) -> Vec<f64> {
        point_to_vec(&self.viewer.controls().target)
    }

    /// World-to-camera matrix (column-major)
    #[wasm_bindgen(js_name = viewMatrix)]
    pub fn view_matrix(&self) -> Vec<f64> {
        column_major(&self.viewer.camera().view_matrix())
    }

    /// Projection matrix (column-major)
    #[wasm_bindgen(js_name = projectionMatrix)]
    pub fn projection_matrix(&self) -> Vec<f64> {
        column_major(self.viewer.camera().projection_matrix())
    }
}
