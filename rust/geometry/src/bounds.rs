// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes
//!
//! Boxes are always computed on demand from the current geometry and world
//! transform. Nothing in this crate caches a box across frames.

use nalgebra::{Matrix4, Point3, Vector3};

/// Axis-aligned bounding box in f64 precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Point3<f64>,
    /// Maximum corner
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Create an empty box (min = +inf, max = -inf)
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create a box from explicit corners
    #[inline]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut bounds = Self::empty();
        for point in points {
            bounds.expand_by_point(point);
        }
        bounds
    }

    /// Check whether no point has been added yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Expand bounds to include a point
    #[inline]
    pub fn expand_by_point(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Union of two boxes. Empty boxes are ignored.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        let mut merged = *self;
        merged.expand_by_point(&other.min);
        merged.expand_by_point(&other.max);
        merged
    }

    /// Midpoint of the box (origin for an empty box)
    #[inline]
    pub fn center(&self) -> Point3<f64> {
        if self.is_empty() {
            return Point3::origin();
        }
        nalgebra::center(&self.min, &self.max)
    }

    /// Extent per axis (zero for an empty box)
    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Largest extent across the three axes
    #[inline]
    pub fn max_dim(&self) -> f64 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }

    /// The 8 corners, ordered by (x, y, z) bit pattern
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Axis-aligned box enclosing this box after applying `matrix`
    ///
    /// Transforms all 8 corners, so rotated boxes grow to stay axis-aligned.
    pub fn transformed(&self, matrix: &Matrix4<f64>) -> BoundingBox {
        if self.is_empty() {
            return *self;
        }
        let corners = self.corners().map(|corner| matrix.transform_point(&corner));
        BoundingBox::from_points(corners.iter())
    }

    /// Check if a point lies inside or on the box
    #[inline]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_box() {
        let bounds = BoundingBox::empty();
        assert!(bounds.is_empty());
        assert_eq!(bounds.size(), Vector3::zeros());
        assert_eq!(bounds.center(), Point3::origin());
        assert_eq!(bounds.max_dim(), 0.0);
    }

    #[test]
    fn test_center_and_size() {
        let bounds = BoundingBox::new(Point3::new(-1.0, 0.0, 2.0), Point3::new(3.0, 1.0, 8.0));
        assert_relative_eq!(bounds.center(), Point3::new(1.0, 0.5, 5.0));
        assert_relative_eq!(bounds.size(), Vector3::new(4.0, 1.0, 6.0));
        assert_relative_eq!(bounds.max_dim(), 6.0);
    }

    #[test]
    fn test_max_dim_picks_largest_axis() {
        for (sx, sy, sz) in [(1.0, 2.0, 3.0), (5.0, 0.5, 0.1), (0.0, 7.5, 7.0)] {
            let bounds = BoundingBox::new(Point3::origin(), Point3::new(sx, sy, sz));
            assert_relative_eq!(bounds.max_dim(), f64::max(sx, f64::max(sy, sz)));
        }
    }

    #[test]
    fn test_single_point_is_degenerate_not_empty() {
        let point = Point3::new(2.0, 2.0, 2.0);
        let bounds = BoundingBox::from_points([point].iter());
        assert!(!bounds.is_empty());
        assert_eq!(bounds.max_dim(), 0.0);
        assert_eq!(bounds.center(), point);
    }

    #[test]
    fn test_union_ignores_empty() {
        let a = BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = BoundingBox::new(Point3::new(-2.0, 0.5, 0.5), Point3::new(0.5, 3.0, 0.5));

        assert_eq!(a.union(&BoundingBox::empty()), a);
        assert_eq!(BoundingBox::empty().union(&a), a);

        let merged = a.union(&b);
        assert_eq!(merged.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(merged.max, Point3::new(1.0, 3.0, 1.0));
    }

    #[test]
    fn test_transformed_rotation_grows_box() {
        let bounds = BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let rotation = nalgebra::Rotation3::from_axis_angle(
            &Vector3::z_axis(),
            std::f64::consts::FRAC_PI_4,
        )
        .to_homogeneous();

        let rotated = bounds.transformed(&rotation);
        assert_relative_eq!(rotated.max.x, 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(rotated.max.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transformed_translation() {
        let bounds = BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let matrix = Matrix4::new_translation(&Vector3::new(10.0, 0.0, -5.0));
        let moved = bounds.transformed(&matrix);
        assert_relative_eq!(moved.min, Point3::new(10.0, 0.0, -5.0));
        assert_relative_eq!(moved.max, Point3::new(11.0, 1.0, -4.0));
    }

    #[test]
    fn test_contains() {
        let bounds = BoundingBox::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(bounds.contains(&Point3::new(0.5, 1.0, 0.0)));
        assert!(!bounds.contains(&Point3::new(1.5, 0.5, 0.5)));
    }
}
