// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Nearest pivot anchor under the pointer
//!
//! The pointer is turned into a camera ray, the ray is cast against the
//! object's geometry, and the hit point is matched against the anchor table.
//! Each anchor's distance to the hit gets its category penalty added first, so
//! corners are preferred over edges and edges over faces.

use crate::camera::{Camera, Viewport};
use crate::config::ViewerConfig;
use crate::error::{Error, Result};
use crate::pivot::{AnchorCategory, PIVOT_ANCHORS};
use crate::scene::SceneObject;
use nalgebra::{Matrix4, Point2, Point3};

/// Pointer position in viewport pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerPosition {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// Pixels to normalized device coordinates (x right, y up, both in [-1, 1]).
pub fn to_ndc(pointer: &PointerPosition, viewport: &Viewport) -> Result<Point2<f64>> {
    if !(viewport.width > 0.0 && viewport.height > 0.0) {
        return Err(Error::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(Point2::new(
        pointer.client_x / viewport.width * 2.0 - 1.0,
        -(pointer.client_y / viewport.height) * 2.0 + 1.0,
    ))
}

/// Index of the anchor closest to `hit` after category penalties.
///
/// The center anchor is never returned. Ties go to the anchor that comes first
/// in the table. `None` only when no candidate has a finite score.
pub fn nearest_anchor(
    hit: &Point3<f64>,
    world_matrix: &Matrix4<f64>,
    config: &ViewerConfig,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut min_distance = f64::INFINITY;

    for (index, anchor) in PIVOT_ANCHORS.iter().enumerate() {
        if anchor.category == AnchorCategory::Center {
            continue;
        }
        let distance = (anchor.world_position(world_matrix) - hit).norm()
            + anchor.category.penalty(config);
        if distance < min_distance {
            min_distance = distance;
            best = Some(index);
        }
    }

    best
}

/// Anchor under the pointer, or `None` when the ray misses the object.
pub fn resolve_pivot(
    ndc: &Point2<f64>,
    camera: &Camera,
    object: &SceneObject,
    config: &ViewerConfig,
) -> Result<Option<usize>> {
    let ray = camera.ray_from_ndc(ndc)?;
    let Some(hit) = object.intersect(&ray)? else {
        return Ok(None);
    };

    let index = nearest_anchor(&hit.point, &object.world_matrix(), config);
    if let Some(index) = index {
        tracing::debug!(
            object = %object.name,
            index,
            category = PIVOT_ANCHORS[index].category.name(),
            distance = hit.distance,
            "Resolved pivot anchor"
        );
    }
    Ok(index)
}
