// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pivot anchors
//!
//! Every object carries 27 candidate pivot points laid out on a 3×3×3 grid in
//! its local space: the center, 8 corners, 12 edge midpoints and 6 face
//! centers. The grid spans [-1, 1] on each axis, which is exactly the extent
//! of the default 2×2×2 box.

use crate::config::ViewerConfig;
use nalgebra::{Matrix4, Point3, UnitQuaternion};
use sceneview_geometry::euler_to_rotation;
use std::f64::consts::{FRAC_PI_2, PI};
use AnchorCategory::{Center, Corner, Edge, Face};

/// Anchor kind, determined by how many local coordinates are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorCategory {
    Center,
    Corner,
    Edge,
    Face,
}

impl AnchorCategory {
    /// Distance added to a hit before anchors are compared.
    ///
    /// Corners win over edges, edges over faces, when the pointer is roughly
    /// equidistant. The center is never a candidate.
    pub fn penalty(self, config: &ViewerConfig) -> f64 {
        match self {
            AnchorCategory::Center => f64::INFINITY,
            AnchorCategory::Corner => config.corner_penalty,
            AnchorCategory::Edge => config.edge_penalty,
            AnchorCategory::Face => config.face_penalty,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnchorCategory::Center => "center",
            AnchorCategory::Corner => "corner",
            AnchorCategory::Edge => "edge",
            AnchorCategory::Face => "face",
        }
    }
}

/// One candidate pivot point in object-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotAnchor {
    pub category: AnchorCategory,
    /// Local position, each coordinate in {-1, 0, 1}.
    pub position: [f64; 3],
    /// Gizmo orientation at this anchor, XYZ Euler angles in radians.
    pub rotation: [f64; 3],
}

impl PivotAnchor {
    const fn new(category: AnchorCategory, position: [f64; 3], rotation: [f64; 3]) -> Self {
        Self {
            category,
            position,
            rotation,
        }
    }

    #[inline]
    pub fn local_position(&self) -> Point3<f64> {
        Point3::from(self.position)
    }

    /// Anchor position after applying an object's world matrix.
    pub fn world_position(&self, world_matrix: &Matrix4<f64>) -> Point3<f64> {
        world_matrix.transform_point(&self.local_position())
    }

    #[inline]
    pub fn local_rotation(&self) -> UnitQuaternion<f64> {
        euler_to_rotation(self.rotation)
    }
}

const NONE: [f64; 3] = [0.0, 0.0, 0.0];
const QUARTER_Y: [f64; 3] = [0.0, FRAC_PI_2, 0.0];
const FLIPPED: [f64; 3] = [PI, FRAC_PI_2, FRAC_PI_2];

/// Index of the center anchor.
pub const CENTER_ANCHOR: usize = 0;

/// All anchors in selection order. Indices are stable and shared with the
/// renderer.
pub static PIVOT_ANCHORS: [PivotAnchor; 27] = [
    PivotAnchor::new(Center, [0.0, 0.0, 0.0], QUARTER_Y),
    // corners
    PivotAnchor::new(Corner, [-1.0, -1.0, -1.0], NONE),
    PivotAnchor::new(Corner, [1.0, -1.0, -1.0], NONE),
    PivotAnchor::new(Corner, [-1.0, 1.0, -1.0], QUARTER_Y),
    PivotAnchor::new(Corner, [1.0, 1.0, -1.0], QUARTER_Y),
    PivotAnchor::new(Corner, [-1.0, -1.0, 1.0], QUARTER_Y),
    PivotAnchor::new(Corner, [1.0, -1.0, 1.0], QUARTER_Y),
    PivotAnchor::new(Corner, [-1.0, 1.0, 1.0], QUARTER_Y),
    PivotAnchor::new(Corner, [1.0, 1.0, 1.0], QUARTER_Y),
    // edges
    PivotAnchor::new(Edge, [0.0, -1.0, -1.0], NONE),
    PivotAnchor::new(Edge, [-1.0, 0.0, -1.0], NONE),
    PivotAnchor::new(Edge, [-1.0, -1.0, 0.0], NONE),
    PivotAnchor::new(Edge, [1.0, 0.0, -1.0], NONE),
    PivotAnchor::new(Edge, [1.0, -1.0, 0.0], FLIPPED),
    PivotAnchor::new(Edge, [0.0, 1.0, -1.0], FLIPPED),
    PivotAnchor::new(Edge, [-1.0, 1.0, 0.0], FLIPPED),
    PivotAnchor::new(Edge, [1.0, 1.0, 0.0], NONE),
    PivotAnchor::new(Edge, [0.0, -1.0, 1.0], FLIPPED),
    PivotAnchor::new(Edge, [-1.0, 0.0, 1.0], QUARTER_Y),
    PivotAnchor::new(Edge, [1.0, 0.0, 1.0], QUARTER_Y),
    PivotAnchor::new(Edge, [0.0, 1.0, 1.0], FLIPPED),
    // faces
    PivotAnchor::new(Face, [0.0, 0.0, 1.0], NONE),
    PivotAnchor::new(Face, [0.0, 1.0, 0.0], QUARTER_Y),
    PivotAnchor::new(Face, [1.0, 0.0, 0.0], FLIPPED),
    PivotAnchor::new(Face, [0.0, 0.0, -1.0], NONE),
    PivotAnchor::new(Face, [0.0, -1.0, 0.0], NONE),
    PivotAnchor::new(Face, [-1.0, 0.0, 0.0], NONE),
];

/// Look up an anchor by index.
#[inline]
pub fn anchor(index: usize) -> Option<&'static PivotAnchor> {
    PIVOT_ANCHORS.get(index)
}

/// Whether pointer input is currently choosing a new pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PivotMode {
    #[default]
    Idle,
    Selecting,
}

/// Active pivot anchor plus one level of undo for pivot-change mode.
///
/// Entering the mode remembers the current index. While selecting, hover
/// updates move the index freely; a click commits it, Escape restores the
/// remembered one. Events that don't apply to the current mode are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PivotSelection {
    index: usize,
    previous: usize,
    mode: PivotMode,
}

impl PivotSelection {
    pub fn new() -> Self {
        Self {
            index: CENTER_ANCHOR,
            previous: CENTER_ANCHOR,
            mode: PivotMode::Idle,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn previous(&self) -> usize {
        self.previous
    }

    #[inline]
    pub fn mode(&self) -> PivotMode {
        self.mode
    }

    #[inline]
    pub fn is_selecting(&self) -> bool {
        self.mode == PivotMode::Selecting
    }

    /// The active anchor.
    pub fn anchor(&self) -> &'static PivotAnchor {
        &PIVOT_ANCHORS[self.index]
    }

    /// Start choosing a new pivot. Returns false if already selecting.
    pub fn enter(&mut self) -> bool {
        if self.is_selecting() {
            return false;
        }
        self.previous = self.index;
        self.mode = PivotMode::Selecting;
        true
    }

    /// Move the candidate pivot. Ignored outside pivot mode or for indices
    /// outside the anchor table.
    pub fn update(&mut self, index: usize) -> bool {
        if !self.is_selecting() || index >= PIVOT_ANCHORS.len() {
            return false;
        }
        self.index = index;
        true
    }

    /// Commit the candidate and leave pivot mode.
    pub fn confirm(&mut self) -> bool {
        if !self.is_selecting() {
            return false;
        }
        self.previous = self.index;
        self.mode = PivotMode::Idle;
        true
    }

    /// Restore the pivot active before the mode was entered and leave pivot mode.
    pub fn cancel(&mut self) -> bool {
        if !self.is_selecting() {
            return false;
        }
        self.index = self.previous;
        self.mode = PivotMode::Idle;
        true
    }
}

impl Default for PivotSelection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn zero_count(anchor: &PivotAnchor) -> usize {
        anchor.position.iter().filter(|c| **c == 0.0).count()
    }

    #[test]
    fn table_has_expected_category_counts() {
        let count = |category| {
            PIVOT_ANCHORS
                .iter()
                .filter(|a| a.category == category)
                .count()
        };
        assert_eq!(PIVOT_ANCHORS.len(), 27);
        assert_eq!(count(Center), 1);
        assert_eq!(count(Corner), 8);
        assert_eq!(count(Edge), 12);
        assert_eq!(count(Face), 6);
    }

    #[test]
    fn category_matches_zero_coordinates() {
        for anchor in PIVOT_ANCHORS.iter() {
            let expected = match zero_count(anchor) {
                0 => Corner,
                1 => Edge,
                2 => Face,
                _ => Center,
            };
            assert_eq!(anchor.category, expected, "{:?}", anchor.position);
            assert!(anchor.position.iter().all(|c| [-1.0, 0.0, 1.0].contains(c)));
        }
    }

    #[test]
    fn positions_are_unique() {
        for (i, a) in PIVOT_ANCHORS.iter().enumerate() {
            for b in PIVOT_ANCHORS.iter().skip(i + 1) {
                assert_ne!(a.position, b.position);
            }
        }
    }

    #[test]
    fn world_position_applies_transform() {
        let world = Matrix4::new_translation(&Vector3::new(10.0, 0.0, 0.0))
            * Matrix4::new_scaling(2.0);
        let corner = &PIVOT_ANCHORS[8];
        assert_relative_eq!(
            corner.world_position(&world),
            Point3::new(12.0, 2.0, 2.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn center_is_never_a_candidate() {
        let config = ViewerConfig::default();
        assert!(Center.penalty(&config).is_infinite());
        assert!(Corner.penalty(&config) < Edge.penalty(&config));
        assert!(Edge.penalty(&config) < Face.penalty(&config));
    }

    #[test]
    fn escape_restores_previous_pivot() {
        let mut pivot = PivotSelection::new();
        pivot.enter();
        pivot.update(4);
        pivot.confirm();
        assert_eq!(pivot.index(), 4);

        pivot.enter();
        pivot.update(7);
        pivot.update(12);
        assert_eq!(pivot.index(), 12);
        assert!(pivot.cancel());

        assert_eq!(pivot.index(), 4);
        assert_eq!(pivot.mode(), PivotMode::Idle);
    }

    #[test]
    fn click_commits_candidate() {
        let mut pivot = PivotSelection::new();
        pivot.enter();
        pivot.update(21);
        assert!(pivot.confirm());
        assert_eq!(pivot.index(), 21);
        assert_eq!(pivot.previous(), 21);
        assert!(!pivot.is_selecting());
    }

    #[test]
    fn events_outside_pivot_mode_are_ignored() {
        let mut pivot = PivotSelection::new();
        assert!(!pivot.update(5));
        assert!(!pivot.confirm());
        assert!(!pivot.cancel());
        assert_eq!(pivot.index(), CENTER_ANCHOR);

        pivot.enter();
        assert!(!pivot.enter());
        assert!(!pivot.update(27));
        assert_eq!(pivot.index(), CENTER_ANCHOR);
    }
}
