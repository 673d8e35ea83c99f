// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fit to screen
//!
//! Places the camera so a bounding box fills the view with a margin. The
//! camera sits on a fixed diagonal from the box center and the orbit target
//! moves to the center, so orbiting afterwards circles the framed object.

use crate::camera::{Camera, Projection};
use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::error::{Error, Result};
use crate::scene::SceneObject;
use nalgebra::{Point3, Vector3};
use sceneview_geometry::BoundingBox;

/// Where a fit placed the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOutcome {
    /// Center of the framed box, now the orbit target.
    pub center: Point3<f64>,
    /// Framing distance before it is spread along the fit direction.
    pub distance: f64,
    pub camera_position: Point3<f64>,
}

/// Camera distance that frames an extent of `max_dim`, padding included.
pub fn framing_distance(max_dim: f64, projection: &Projection, config: &ViewerConfig) -> f64 {
    let extent = max_dim.max(config.min_extent);
    let distance = match projection {
        Projection::Perspective { fov_deg } => {
            let fov = fov_deg.to_radians();
            (extent / (2.0 * (fov / 2.0).tan())).abs()
        }
        Projection::Orthographic { .. } => extent * config.ortho_distance_factor,
    };
    distance * config.fit_padding
}

/// Frame `bounds`: move the camera, retarget the orbit controls and refresh
/// the projection.
pub fn fit_bounds(
    bounds: &BoundingBox,
    camera: &mut Camera,
    controls: &mut OrbitControls,
    config: &ViewerConfig,
) -> Result<FitOutcome> {
    if bounds.is_empty()
        || !bounds.min.iter().chain(bounds.max.iter()).all(|c| c.is_finite())
    {
        return Err(Error::NoTarget);
    }

    let center = bounds.center();
    let distance = framing_distance(bounds.max_dim(), &camera.projection(), config);
    let camera_position = center + Vector3::from(config.fit_direction) * distance;

    camera.position = camera_position;
    controls.target = center;
    camera.look_at(&center);
    camera.update_projection_matrix();
    controls.update(camera);

    tracing::debug!(
        center = ?center,
        distance,
        orthographic = camera.is_orthographic(),
        "Fitted camera to bounds"
    );

    Ok(FitOutcome {
        center,
        distance,
        camera_position: camera.position,
    })
}

/// Frame a single object. Without a target or without geometry the camera is
/// left untouched.
pub fn fit_to_screen(
    target: Option<&SceneObject>,
    camera: &mut Camera,
    controls: &mut OrbitControls,
    config: &ViewerConfig,
) -> Result<FitOutcome> {
    let Some(object) = target else {
        tracing::warn!("Fit to screen requested without a target");
        return Err(Error::NoTarget);
    };
    let Some(bounds) = object.world_bounds() else {
        tracing::warn!(object = %object.name, "Fit target has no geometry");
        return Err(Error::NoTarget);
    };
    fit_bounds(&bounds, camera, controls, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Viewport;
    use approx::assert_relative_eq;
    use sceneview_geometry::{Mesh, Transform};

    fn setup(config: &ViewerConfig) -> (Camera, OrbitControls) {
        let mut camera = Camera::perspective(config, Viewport::new(1280.0, 720.0).unwrap());
        camera.position = Point3::from(config.initial_camera_position);
        camera.look_at(&Point3::origin());
        (camera, OrbitControls::new(config))
    }

    fn cube_at(position: [f64; 3]) -> SceneObject {
        SceneObject::new("box", Some(Mesh::cuboid(2.0, 2.0, 2.0)))
            .with_transform(Transform::from_parts(position, [0.0; 3], 1.0))
    }

    #[test]
    fn test_perspective_distance_for_default_box() {
        let config = ViewerConfig::default();
        let distance = framing_distance(2.0, &Projection::Perspective { fov_deg: 50.0 }, &config);
        // 2 / (2 tan 25deg) * 3
        assert_relative_eq!(distance, 6.433_520_76, epsilon = 1e-8);
    }

    #[test]
    fn test_orthographic_distance() {
        let config = ViewerConfig::default();
        let distance = framing_distance(2.0, &Projection::Orthographic { zoom: 100.0 }, &config);
        assert_relative_eq!(distance, 12.0);
    }

    #[test]
    fn test_fit_centers_target_and_looks_at_it() {
        let config = ViewerConfig::default();
        let (mut camera, mut controls) = setup(&config);
        let object = cube_at([4.0, -2.0, 1.0]);

        let outcome = fit_to_screen(Some(&object), &mut camera, &mut controls, &config).unwrap();

        assert_relative_eq!(outcome.center, Point3::new(4.0, -2.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(controls.target, outcome.center);
        let offset = camera.position - outcome.center;
        let half = outcome.distance * 0.5;
        assert_relative_eq!(offset, Vector3::new(half, half, half), epsilon = 1e-6);

        // the target projects to the middle of the screen
        let ndc = camera.project(&outcome.center);
        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fit_is_idempotent() {
        let config = ViewerConfig::default();
        let (mut camera, mut controls) = setup(&config);
        let object = cube_at([1.0, 2.0, 3.0]);

        let first = fit_to_screen(Some(&object), &mut camera, &mut controls, &config).unwrap();
        let second = fit_to_screen(Some(&object), &mut camera, &mut controls, &config).unwrap();

        assert_relative_eq!(first.camera_position, second.camera_position, epsilon = 1e-9);
        assert_relative_eq!(first.distance, second.distance);
    }

    #[test]
    fn test_degenerate_box_gives_finite_distance() {
        let config = ViewerConfig::default();
        let (mut camera, mut controls) = setup(&config);
        let point = BoundingBox::new(Point3::new(1.0, 1.0, 1.0), Point3::new(1.0, 1.0, 1.0));

        let outcome = fit_bounds(&point, &mut camera, &mut controls, &config).unwrap();
        assert!(outcome.distance.is_finite());
        assert!(outcome.distance > 0.0);
        assert!(camera.position.iter().all(|c| c.is_finite()));
        // min distance of the orbit controls still applies
        assert!((camera.position - point.center()).norm() >= config.min_distance - 1e-9);
    }

    #[test]
    fn test_missing_target_leaves_camera() {
        let config = ViewerConfig::default();
        let (mut camera, mut controls) = setup(&config);
        let before = camera.position;

        assert!(matches!(
            fit_to_screen(None, &mut camera, &mut controls, &config),
            Err(Error::NoTarget)
        ));
        let empty = SceneObject::new("empty", None);
        assert!(matches!(
            fit_to_screen(Some(&empty), &mut camera, &mut controls, &config),
            Err(Error::NoTarget)
        ));
        assert_eq!(camera.position, before);
    }

    #[test]
    fn test_orthographic_fit_keeps_zoom() {
        let config = ViewerConfig::default();
        let mut camera = Camera::orthographic(&config, Viewport::new(800.0, 600.0).unwrap());
        let mut controls = OrbitControls::new(&config);
        let object = cube_at([0.0, 0.0, 0.0]);

        let outcome = fit_to_screen(Some(&object), &mut camera, &mut controls, &config).unwrap();
        assert_relative_eq!(outcome.distance, 12.0, epsilon = 1e-6);
        assert_eq!(camera.projection(), Projection::Orthographic { zoom: 100.0 });
    }

    #[test]
    fn test_larger_objects_are_framed_further_away() {
        let config = ViewerConfig::default();
        let (mut camera, mut controls) = setup(&config);
        let small = BoundingBox::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        let large = BoundingBox::new(Point3::new(-4.0, -1.0, -1.0), Point3::new(4.0, 1.0, 1.0));

        let a = fit_bounds(&small, &mut camera, &mut controls, &config).unwrap();
        let b = fit_bounds(&large, &mut camera, &mut controls, &config).unwrap();
        assert_relative_eq!(b.distance / a.distance, 4.0, epsilon = 1e-9);
    }
}
