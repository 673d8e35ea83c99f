// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JavaScript API for SceneView
//!
//! One `ViewerAPI` per canvas. The renderer forwards pointer, wheel and key
//! events, then reads back camera matrices, pivot placement and per-object
//! appearance each frame.

mod camera;
mod pivot;
mod scene;

use crate::utils::to_js_error;
use sceneview_viewer::{Viewer, ViewerConfig};
use wasm_bindgen::prelude::*;

/// Main SceneView API
#[wasm_bindgen]
pub struct ViewerAPI {
    viewer: Viewer,
}

#[wasm_bindgen]
impl ViewerAPI {
    /// Create a viewer for a canvas of the given CSS size.
    ///
    /// `config` is an optional (possibly partial) `ViewerConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64, config: JsValue) -> Result<ViewerAPI, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let config: ViewerConfig = if config.is_undefined() || config.is_null() {
            ViewerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        let viewer = Viewer::new(config, width, height).map_err(to_js_error)?;
        Ok(Self { viewer })
    }

    /// Active configuration as a JS object
    #[wasm_bindgen(getter)]
    pub fn config(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.viewer.config()).unwrap_or(JsValue::NULL)
    }

    /// Get version string
    #[wasm_bindgen(getter)]
    pub fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

/// Flatten a nalgebra matrix in column-major order for WebGL
#[inline]
fn column_major(matrix: &nalgebra::Matrix4<f64>) -> Vec<f64> {
    matrix.as_slice().to_vec()
}

#[inline]
fn point_to_vec(point: &nalgebra::Point3<f64>) -> Vec<f64> {
    vec![point.x, point.y, point.z]
}
