// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orbit controls
//!
//! The camera orbits a target point. Pointer input only accumulates deltas;
//! `update` applies them in spherical coordinates around the target, clamps
//! distance and polar angle, and re-aims the camera. There is no damping.

use crate::camera::{Camera, Projection};
use crate::config::ViewerConfig;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::f64::consts::{PI, TAU};

/// Keeps the polar angle off the poles so `look_at` never degenerates.
const POLAR_EPSILON: f64 = 1e-6;

/// Orbit camera controls.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point the camera orbits around and looks at.
    pub target: Point3<f64>,
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_polar_angle: f64,
    pub max_polar_angle: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Radians of rotation per viewport height of pointer travel, divided by 2π.
    pub rotate_speed: f64,
    delta_theta: f64,
    delta_phi: f64,
    scale: f64,
    zoom_scale: f64,
    pan_offset: Vector3<f64>,
}

impl OrbitControls {
    /// Controls orbiting the origin with the configured distance limits.
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            target: Point3::origin(),
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            min_zoom: 0.0,
            max_zoom: f64::INFINITY,
            rotate_speed: 1.0,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            zoom_scale: 1.0,
            pan_offset: Vector3::zeros(),
        }
    }

    /// Queue a rotation around the up axis.
    pub fn rotate_left(&mut self, angle: f64) {
        self.delta_theta -= angle;
    }

    /// Queue a rotation towards the up axis.
    pub fn rotate_up(&mut self, angle: f64) {
        self.delta_phi -= angle;
    }

    /// Queue a rotation from a pointer drag in pixels.
    pub fn rotate_by_pointer(&mut self, dx: f64, dy: f64, camera: &Camera) {
        let height = camera.viewport().height;
        self.rotate_left(TAU * dx / height * self.rotate_speed);
        self.rotate_up(TAU * dy / height * self.rotate_speed);
    }

    /// Move closer by `factor` (> 1). Orthographic cameras zoom instead.
    pub fn dolly_in(&mut self, factor: f64) {
        if factor > 0.0 && factor.is_finite() {
            self.scale /= factor;
            self.zoom_scale *= factor;
        }
    }

    /// Move away by `factor` (> 1). Orthographic cameras zoom instead.
    pub fn dolly_out(&mut self, factor: f64) {
        if factor > 0.0 && factor.is_finite() {
            self.scale *= factor;
            self.zoom_scale /= factor;
        }
    }

    /// Queue a screen-space pan from a pointer drag in pixels.
    pub fn pan(&mut self, dx: f64, dy: f64, camera: &Camera) {
        let viewport = camera.viewport();
        let world = camera.world_matrix();
        let right: Vector3<f64> = world.fixed_view::<3, 1>(0, 0).into_owned();
        let up: Vector3<f64> = world.fixed_view::<3, 1>(0, 1).into_owned();

        let (per_px_x, per_px_y) = match camera.projection() {
            Projection::Perspective { fov_deg } => {
                let distance = (camera.position - self.target).norm();
                let target_distance = distance * (fov_deg.to_radians() * 0.5).tan();
                let per_px = 2.0 * target_distance / viewport.height;
                (per_px, per_px)
            }
            Projection::Orthographic { zoom } => (1.0 / zoom, 1.0 / zoom),
        };

        self.pan_offset += right * (-dx * per_px_x) + up * (dy * per_px_y);
    }

    /// Apply queued input and re-aim the camera. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let before = (camera.position, camera.orientation);

        let to_y_up = UnitQuaternion::rotation_between(&camera.up, &Vector3::y())
            .unwrap_or_else(UnitQuaternion::identity);
        let offset = to_y_up * (camera.position - self.target);

        let mut radius = offset.norm();
        let (mut theta, mut phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, 0.0)
        };

        theta += self.delta_theta;
        phi += self.delta_phi;
        phi = phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        if let Projection::Orthographic { zoom } = camera.projection() {
            let zoom = (zoom * self.zoom_scale).clamp(self.min_zoom, self.max_zoom);
            if self.zoom_scale != 1.0 {
                camera.set_projection(Projection::Orthographic { zoom });
            }
        } else {
            radius *= self.scale;
        }
        radius = radius.clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset;

        let sin_phi_radius = phi.sin() * radius;
        let spherical = Vector3::new(
            sin_phi_radius * theta.sin(),
            phi.cos() * radius,
            sin_phi_radius * theta.cos(),
        );
        camera.position = self.target + to_y_up.inverse() * spherical;
        camera.look_at(&self.target);

        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.zoom_scale = 1.0;
        self.pan_offset = Vector3::zeros();

        before != (camera.position, camera.orientation)
    }
}
