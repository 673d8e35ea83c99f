// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer state
//!
//! [`Viewer`] owns the scene, camera, orbit controls, display options and the
//! pivot selection, and routes pointer and keyboard input between them. All
//! collaborators are plain fields, so every operation can be driven and
//! inspected without a renderer.

use crate::camera::{Camera, Projection, Viewport};
use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::error::{Error, Result};
use crate::framing::{self, FitOutcome};
use crate::pivot::PivotSelection;
use crate::resolver::{resolve_pivot, to_ndc, PointerPosition};
use crate::scene::{ObjectId, Scene, SceneObject};
use crate::view::{DisplaySettings, DisplayToggle, ObjectAppearance, ViewPreset, ViewerCommand};
use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};

/// Wheel step, matching the renderer's default zoom speed.
const ZOOM_STEP: f64 = 0.95;

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Pivot-change mode consumed the click and committed this anchor.
    PivotCommitted(usize),
    /// An object was hit and is now selected.
    Selected(ObjectId),
    /// Nothing was hit; the selection was cleared.
    Deselected,
}

/// Interactive scene viewer.
#[derive(Debug, Clone)]
pub struct Viewer {
    config: ViewerConfig,
    scene: Scene,
    camera: Camera,
    controls: OrbitControls,
    display: DisplaySettings,
    pivot: PivotSelection,
    selected: Option<ObjectId>,
    pivot_target: Option<ObjectId>,
}

impl Viewer {
    /// Create a viewer with a perspective camera at the configured start position.
    pub fn new(config: ViewerConfig, width: f64, height: f64) -> Result<Self> {
        config.validate()?;
        let viewport = Viewport::new(width, height)?;

        let mut camera = Camera::perspective(&config, viewport);
        camera.position = Point3::from(config.initial_camera_position);
        camera.look_at(&Point3::origin());
        let mut controls = OrbitControls::new(&config);
        controls.update(&mut camera);

        Ok(Self {
            config,
            scene: Scene::new(),
            camera,
            controls,
            display: DisplaySettings::default(),
            pivot: PivotSelection::new(),
            selected: None,
            pivot_target: None,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    pub fn pivot(&self) -> &PivotSelection {
        &self.pivot
    }

    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    pub fn add_object(&mut self, object: SceneObject) -> Result<ObjectId> {
        self.scene.add(object)
    }

    /// Select an object, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<ObjectId>) -> Result<()> {
        self.ensure_exists(id)?;
        self.selected = id;
        Ok(())
    }

    /// Object whose anchors pivot mode works on. Falls back to the selection
    /// when unset.
    pub fn set_pivot_target(&mut self, id: Option<ObjectId>) -> Result<()> {
        self.ensure_exists(id)?;
        self.pivot_target = id;
        Ok(())
    }

    pub fn pivot_target(&self) -> Option<ObjectId> {
        self.pivot_target.or(self.selected)
    }

    fn ensure_exists(&self, id: Option<ObjectId>) -> Result<()> {
        match id {
            Some(id) if self.scene.get(id).is_none() => {
                Err(Error::UnknownObject(format!("#{}", id.0)))
            }
            _ => Ok(()),
        }
    }

    fn pivot_object(&self) -> Option<&SceneObject> {
        self.pivot_target().and_then(|id| self.scene.get(id))
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.camera.set_viewport(Viewport::new(width, height)?);
        Ok(())
    }

    /// Switch between perspective and orthographic, keeping the camera pose.
    pub fn set_orthographic(&mut self, orthographic: bool) {
        self.display.use_ortho = orthographic;
        if self.camera.is_orthographic() == orthographic {
            return;
        }
        let projection = if orthographic {
            Projection::Orthographic {
                zoom: self.config.ortho_zoom,
            }
        } else {
            Projection::Perspective {
                fov_deg: self.config.fov_deg,
            }
        };
        self.camera.set_projection(projection);
        tracing::debug!(orthographic, "Switched camera projection");
    }

    /// Move to a preset looking at the origin, in perspective.
    pub fn apply_preset(&mut self, preset: ViewPreset) {
        self.set_orthographic(false);
        self.move_camera(preset.position());
        tracing::debug!(preset = preset.name(), "Applied view preset");
    }

    fn move_camera(&mut self, position: Point3<f64>) {
        self.camera.position = position;
        self.controls.target = Point3::origin();
        self.camera.look_at(&self.controls.target);
        self.controls.update(&mut self.camera);
    }

    /// Handle a `KeyboardEvent.key`. Returns whether the key was bound.
    pub fn key_down(&mut self, key: &str) -> bool {
        match ViewerCommand::from_key(key) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    pub fn execute(&mut self, command: ViewerCommand) {
        match command {
            ViewerCommand::ApplyPreset(preset) => self.apply_preset(preset),
            ViewerCommand::ToggleOrtho => {
                self.move_camera(ViewPreset::Iso.position());
                self.set_orthographic(!self.display.use_ortho);
            }
            ViewerCommand::ToggleTransform => {
                self.display.toggle(DisplayToggle::Transform);
            }
            ViewerCommand::CancelPivot => {
                self.cancel_pivot();
            }
        }
    }

    /// Flip a display option and return its new value.
    pub fn toggle(&mut self, toggle: DisplayToggle) -> bool {
        if toggle == DisplayToggle::Ortho {
            self.set_orthographic(!self.display.use_ortho);
            return self.display.use_ortho;
        }
        self.display.toggle(toggle)
    }

    /// Frame the pivot target (or selection), or the whole scene when neither
    /// is set.
    pub fn fit_to_screen(&mut self) -> Result<FitOutcome> {
        if let Some(id) = self.pivot_target() {
            return framing::fit_to_screen(
                self.scene.get(id),
                &mut self.camera,
                &mut self.controls,
                &self.config,
            );
        }
        match self.scene.world_bounds() {
            Some(bounds) => {
                framing::fit_bounds(&bounds, &mut self.camera, &mut self.controls, &self.config)
            }
            None => {
                tracing::warn!("Fit to screen requested on an empty scene");
                Err(Error::NoTarget)
            }
        }
    }

    /// Enter pivot-change mode. Returns false if already in it.
    pub fn begin_pivot_change(&mut self) -> bool {
        self.pivot.enter()
    }

    /// Leave pivot-change mode and restore the previous pivot.
    pub fn cancel_pivot(&mut self) -> bool {
        self.pivot.cancel()
    }

    /// Track the anchor under the pointer while in pivot-change mode.
    ///
    /// Returns the new pivot index when it was updated. Misses and pointer
    /// moves outside the mode leave the pivot alone.
    pub fn pointer_move(&mut self, pointer: PointerPosition) -> Result<Option<usize>> {
        if !self.pivot.is_selecting() {
            return Ok(None);
        }
        let Some(object) = self.pivot_object() else {
            return Ok(None);
        };

        let ndc = to_ndc(&pointer, &self.camera.viewport())?;
        let resolved = resolve_pivot(&ndc, &self.camera, object, &self.config)?;
        Ok(resolved.filter(|index| self.pivot.update(*index)))
    }

    /// Commit the pivot in pivot-change mode, otherwise pick an object.
    pub fn click(&mut self, pointer: PointerPosition) -> Result<ClickOutcome> {
        if self.pivot.confirm() {
            return Ok(ClickOutcome::PivotCommitted(self.pivot.index()));
        }

        let ndc = to_ndc(&pointer, &self.camera.viewport())?;
        let ray = self.camera.ray_from_ndc(&ndc)?;
        match self.scene.pick(&ray) {
            Some((id, _)) => {
                self.selected = Some(id);
                Ok(ClickOutcome::Selected(id))
            }
            None => {
                self.selected = None;
                Ok(ClickOutcome::Deselected)
            }
        }
    }

    /// Active anchor in world space on the pivot target.
    pub fn pivot_world_position(&self) -> Option<Point3<f64>> {
        let object = self.pivot_object()?;
        Some(self.pivot.anchor().world_position(&object.world_matrix()))
    }

    /// Gizmo orientation at the active anchor in world space.
    pub fn pivot_world_rotation(&self) -> Option<UnitQuaternion<f64>> {
        let object = self.pivot_object()?;
        Some(object.transform.rotation * self.pivot.anchor().local_rotation())
    }

    fn editable(&mut self) -> Option<&mut SceneObject> {
        if !self.display.show_transform {
            return None;
        }
        let id = self.selected?;
        self.scene.get_mut(id)
    }

    /// Move the selection. Only in transform mode.
    pub fn translate_selected(&mut self, delta: &Vector3<f64>) -> bool {
        match self.editable() {
            Some(object) => {
                object.transform.translate(delta);
                true
            }
            None => false,
        }
    }

    /// Rotate the selection about its active pivot anchor. Only in transform mode.
    pub fn rotate_selected(&mut self, axis: &Unit<Vector3<f64>>, angle: f64) -> bool {
        let anchor = self.pivot.anchor();
        let Some(object) = self.editable() else {
            return false;
        };
        let pivot = anchor.world_position(&object.world_matrix());
        object.transform.rotate_axis_about(&pivot, axis, angle);
        true
    }

    pub fn appearance(&self, id: ObjectId) -> Option<ObjectAppearance> {
        self.scene.get(id)?;
        Some(ObjectAppearance::resolve(
            self.selected == Some(id),
            &self.display,
        ))
    }

    /// Orbit by a pointer drag in pixels.
    pub fn orbit(&mut self, dx: f64, dy: f64) {
        self.controls.rotate_by_pointer(dx, dy, &self.camera);
        self.controls.update(&mut self.camera);
    }

    /// Pan by a pointer drag in pixels.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.controls.pan(dx, dy, &self.camera);
        self.controls.update(&mut self.camera);
    }

    /// Zoom by a wheel delta; negative zooms in.
    pub fn zoom(&mut self, delta_y: f64) {
        if delta_y < 0.0 {
            self.controls.dolly_in(1.0 / ZOOM_STEP);
        } else if delta_y > 0.0 {
            self.controls.dolly_out(1.0 / ZOOM_STEP);
        }
        self.controls.update(&mut self.camera);
    }
}
