// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perspective and orthographic cameras
//!
//! Matrix conventions follow the browser renderer: right-handed, the camera
//! looks down its local -Z axis, NDC spans [-1, 1] on all three axes. The
//! orthographic frustum is sized in viewport pixels divided by the zoom, so
//! zoom is "pixels per world unit".

use crate::config::ViewerConfig;
use crate::error::{Error, Result};
use nalgebra::{
    Isometry3, Matrix3, Matrix4, Point2, Point3, Rotation3, Translation3, UnitQuaternion, Vector3,
};
use sceneview_geometry::Ray;

/// Camera projection type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Vertical field of view in degrees.
    Perspective { fov_deg: f64 },
    /// Pixels per world unit.
    Orthographic { zoom: f64 },
}

impl Projection {
    #[inline]
    pub fn is_orthographic(&self) -> bool {
        matches!(self, Projection::Orthographic { .. })
    }
}

/// Drawing surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a viewport, rejecting zero or non-finite sizes.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Scene camera.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Point3<f64>,
    /// Camera orientation; the camera looks down its local -Z.
    pub orientation: UnitQuaternion<f64>,
    /// Up vector used by `look_at`.
    pub up: Vector3<f64>,
    /// Near clipping plane.
    pub near: f64,
    /// Far clipping plane.
    pub far: f64,
    projection: Projection,
    viewport: Viewport,
    projection_matrix: Matrix4<f64>,
}

impl Camera {
    /// Create a camera at the origin looking down -Z.
    pub fn new(projection: Projection, viewport: Viewport, near: f64, far: f64) -> Self {
        let mut camera = Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
            up: Vector3::y(),
            near,
            far,
            projection,
            viewport,
            projection_matrix: Matrix4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    /// Perspective camera with the configured field of view and clipping planes.
    pub fn perspective(config: &ViewerConfig, viewport: Viewport) -> Self {
        Self::new(
            Projection::Perspective {
                fov_deg: config.fov_deg,
            },
            viewport,
            config.near,
            config.far,
        )
    }

    /// Orthographic camera with the configured zoom and clipping planes.
    pub fn orthographic(config: &ViewerConfig, viewport: Viewport) -> Self {
        Self::new(
            Projection::Orthographic {
                zoom: config.ortho_zoom,
            },
            viewport,
            config.near,
            config.far,
        )
    }

    #[inline]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Switch projection and refresh the projection matrix.
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
        self.update_projection_matrix();
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize and refresh the projection matrix.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.update_projection_matrix();
    }

    #[inline]
    pub fn is_orthographic(&self) -> bool {
        self.projection.is_orthographic()
    }

    /// Rotate the camera so its -Z axis points at `target`.
    ///
    /// A target on the camera position is ignored. When the view direction is
    /// parallel to `up` the direction is nudged so the basis stays defined.
    pub fn look_at(&mut self, target: &Point3<f64>) {
        let mut z = self.position - target;
        if z.norm_squared() == 0.0 {
            return;
        }
        z.normalize_mut();

        let mut x = self.up.cross(&z);
        if x.norm_squared() == 0.0 {
            if self.up.z.abs() == 1.0 {
                z.x += 0.0001;
            } else {
                z.z += 0.0001;
            }
            z.normalize_mut();
            x = self.up.cross(&z);
        }
        x.normalize_mut();
        let y = z.cross(&x);

        let basis = Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x, y, z]));
        self.orientation = UnitQuaternion::from_rotation_matrix(&basis);
    }

    /// Camera-to-world matrix.
    pub fn world_matrix(&self) -> Matrix4<f64> {
        self.isometry().to_homogeneous()
    }

    /// World-to-camera matrix.
    pub fn view_matrix(&self) -> Matrix4<f64> {
        self.isometry().inverse().to_homogeneous()
    }

    fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.orientation)
    }

    /// Unit view direction in world space.
    #[inline]
    pub fn forward(&self) -> Vector3<f64> {
        self.orientation * -Vector3::z()
    }

    /// Current projection matrix (refreshed by `update_projection_matrix`).
    #[inline]
    pub fn projection_matrix(&self) -> &Matrix4<f64> {
        &self.projection_matrix
    }

    /// Recompute the projection matrix from projection, viewport and clip planes.
    pub fn update_projection_matrix(&mut self) {
        let (near, far) = (self.near, self.far);
        self.projection_matrix = match self.projection {
            Projection::Perspective { fov_deg } => {
                let top = near * (fov_deg.to_radians() * 0.5).tan();
                let height = 2.0 * top;
                let width = self.viewport.aspect() * height;
                let left = -0.5 * width;
                make_perspective(left, left + width, top, top - height, near, far)
            }
            Projection::Orthographic { zoom } => {
                let dx = self.viewport.width / (2.0 * zoom);
                let dy = self.viewport.height / (2.0 * zoom);
                make_orthographic(-dx, dx, dy, -dy, near, far)
            }
        };
    }

    /// World position to NDC.
    pub fn project(&self, point: &Point3<f64>) -> Point3<f64> {
        (self.projection_matrix * self.view_matrix()).transform_point(point)
    }

    /// NDC to world position.
    pub fn unproject(&self, ndc: &Point3<f64>) -> Result<Point3<f64>> {
        let inverse = self.projection_matrix.try_inverse().ok_or_else(|| {
            sceneview_geometry::Error::SingularTransform("projection matrix".to_string())
        })?;
        Ok(self.world_matrix().transform_point(&inverse.transform_point(ndc)))
    }

    /// Ray from the camera through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: &Point2<f64>) -> Result<Ray> {
        match self.projection {
            Projection::Perspective { .. } => {
                let through = self.unproject(&Point3::new(ndc.x, ndc.y, 0.5))?;
                Ok(Ray::new(self.position, through - self.position)?)
            }
            Projection::Orthographic { .. } => {
                let depth = (self.near + self.far) / (self.near - self.far);
                let origin = self.unproject(&Point3::new(ndc.x, ndc.y, depth))?;
                Ok(Ray::new(origin, self.forward())?)
            }
        }
    }
}

fn make_perspective(left: f64, right: f64, top: f64, bottom: f64, near: f64, far: f64) -> Matrix4<f64> {
    let x = 2.0 * near / (right - left);
    let y = 2.0 * near / (top - bottom);
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c = -(far + near) / (far - near);
    let d = -2.0 * far * near / (far - near);

    Matrix4::new(
        x, 0.0, a, 0.0, //
        0.0, y, b, 0.0, //
        0.0, 0.0, c, d, //
        0.0, 0.0, -1.0, 0.0,
    )
}

fn make_orthographic(left: f64, right: f64, top: f64, bottom: f64, near: f64, far: f64) -> Matrix4<f64> {
    let w = 1.0 / (right - left);
    let h = 1.0 / (top - bottom);
    let p = 1.0 / (far - near);
    let x = (right + left) * w;
    let y = (top + bottom) * h;
    let z = (far + near) * p;

    Matrix4::new(
        2.0 * w, 0.0, 0.0, -x, //
        0.0, 2.0 * h, 0.0, -y, //
        0.0, 0.0, -2.0 * p, -z, //
        0.0, 0.0, 0.0, 1.0,
    )
}
