// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pivot-change mode and click handling

use super::{point_to_vec, ViewerAPI};
use crate::utils::{to_js_error, warn};
use sceneview_viewer::{ClickOutcome, PointerPosition, PIVOT_ANCHORS};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct AnchorJs {
    category: &'static str,
    position: [f64; 3],
    rotation: [f64; 3],
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum ClickJs {
    Pivot { index: usize },
    Selected { id: usize },
    Deselected,
}

impl From<ClickOutcome> for ClickJs {
    fn from(outcome: ClickOutcome) -> Self {
        match outcome {
            ClickOutcome::PivotCommitted(index) => ClickJs::Pivot { index },
            ClickOutcome::Selected(id) => ClickJs::Selected { id: id.0 },
            ClickOutcome::Deselected => ClickJs::Deselected,
        }
    }
}

#[wasm_bindgen]
impl ViewerAPI {
    /// The 27 pivot anchors in index order, in object-local space
    #[wasm_bindgen(js_name = pivotAnchors)]
    pub fn pivot_anchors(&self) -> JsValue {
        let anchors: Vec<AnchorJs> = PIVOT_ANCHORS
            .iter()
            .map(|anchor| AnchorJs {
                category: anchor.category.name(),
                position: anchor.position,
                rotation: anchor.rotation,
            })
            .collect();
        serde_wasm_bindgen::to_value(&anchors).unwrap_or_else(|_| js_sys::Array::new().into())
    }

    /// Enter pivot-change mode
    #[wasm_bindgen(js_name = beginPivotChange)]
    pub fn begin_pivot_change(&mut self) -> bool {
        self.viewer.begin_pivot_change()
    }

    /// Leave pivot-change mode, restoring the previous pivot
    #[wasm_bindgen(js_name = cancelPivot)]
    pub fn cancel_pivot(&mut self) -> bool {
        self.viewer.cancel_pivot()
    }

    #[wasm_bindgen(getter, js_name = isChangingPivot)]
    pub fn is_changing_pivot(&self) -> bool {
        self.viewer.pivot().is_selecting()
    }

    #[wasm_bindgen(getter, js_name = pivotIndex)]
    pub fn pivot_index(&self) -> usize {
        self.viewer.pivot().index()
    }

    /// Pointer moved to client pixel coordinates. Returns the new pivot index
    /// when pivot-change mode picked one up.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> Option<usize> {
        match self
            .viewer
            .pointer_move(PointerPosition::new(client_x, client_y))
        {
            Ok(index) => index,
            Err(e) => {
                warn(&format!("pivot hover ignored: {}", e));
                None
            }
        }
    }

    /// Click at client pixel coordinates.
    ///
    /// Returns `{ kind: "pivot", index }`, `{ kind: "selected", id }` or
    /// `{ kind: "deselected" }`.
    pub fn click(&mut self, client_x: f64, client_y: f64) -> Result<JsValue, JsValue> {
        let outcome = self
            .viewer
            .click(PointerPosition::new(client_x, client_y))
            .map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&ClickJs::from(outcome))?)
    }

    /// Active pivot in world space, `[x, y, z]`
    #[wasm_bindgen(js_name = pivotWorldPosition)]
    pub fn pivot_world_position(&self) -> Option<Vec<f64>> {
        self.viewer
            .pivot_world_position()
            .map(|point| point_to_vec(&point))
    }

    /// Gizmo orientation at the active pivot, quaternion `[x, y, z, w]`
    #[wasm_bindgen(js_name = pivotWorldRotation)]
    pub fn pivot_world_rotation(&self) -> Option<Vec<f64>> {
        self.viewer.pivot_world_rotation().map(|rotation| {
            let q = rotation.quaternion();
            vec![q.i, q.j, q.k, q.w]
        })
    }
}
