// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Object transforms
//!
//! Position, rotation and scale composed into a 4x4 world matrix, plus the
//! Euler convention shared with the browser renderer (intrinsic X, then Y,
//! then Z: `R = Rx * Ry * Rz`).

use nalgebra::{Matrix4, Point3, Unit, UnitQuaternion, Vector3};

/// Convert XYZ-ordered Euler angles (radians) into a rotation
#[inline]
pub fn euler_to_rotation(euler: [f64; 3]) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::x_axis(), euler[0])
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), euler[1])
        * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), euler[2])
}

/// Apply an affine matrix to a point
#[inline]
pub fn transform_point(matrix: &Matrix4<f64>, point: &Point3<f64>) -> Point3<f64> {
    matrix.transform_point(point)
}

/// Apply the linear part of a matrix to a direction
#[inline]
pub fn transform_vector(matrix: &Matrix4<f64>, vector: &Vector3<f64>) -> Vector3<f64> {
    matrix.transform_vector(vector)
}

/// Translation, rotation and scale of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
    pub scale: Vector3<f64>,
}

impl Transform {
    /// Identity transform
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Transform at `position` with no rotation and unit scale
    pub fn from_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Build a transform from position, XYZ Euler rotation and uniform scale
    pub fn from_parts(position: [f64; 3], euler: [f64; 3], scale: f64) -> Self {
        Self {
            position: Vector3::from(position),
            rotation: euler_to_rotation(euler),
            scale: Vector3::new(scale, scale, scale),
        }
    }

    /// Compose into a world matrix (`T * R * S`)
    pub fn matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Move by a world-space offset
    #[inline]
    pub fn translate(&mut self, delta: &Vector3<f64>) {
        self.position += delta;
    }

    /// Rotate around an arbitrary world-space pivot
    ///
    /// The pivot stays fixed; position and orientation both follow the rotation.
    pub fn rotate_about(&mut self, pivot: &Point3<f64>, rotation: &UnitQuaternion<f64>) {
        let offset = self.position - pivot.coords;
        self.position = pivot.coords + rotation * offset;
        self.rotation = rotation * self.rotation;
    }

    /// Rotate around a world axis passing through `pivot`
    pub fn rotate_axis_about(
        &mut self,
        pivot: &Point3<f64>,
        axis: &Unit<Vector3<f64>>,
        angle: f64,
    ) {
        let rotation = UnitQuaternion::from_axis_angle(axis, angle);
        self.rotate_about(pivot, &rotation);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
