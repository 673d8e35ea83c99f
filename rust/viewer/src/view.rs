// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! View presets, keyboard commands and display settings.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Fixed camera placements looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewPreset {
    Iso,
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl ViewPreset {
    pub fn position(self) -> Point3<f64> {
        match self {
            ViewPreset::Iso => Point3::new(3.0, 3.0, 3.0),
            ViewPreset::Front => Point3::new(0.0, 0.0, 5.0),
            ViewPreset::Back => Point3::new(0.0, 0.0, -5.0),
            ViewPreset::Left => Point3::new(-5.0, 0.0, 0.0),
            ViewPreset::Right => Point3::new(5.0, 0.0, 0.0),
            ViewPreset::Top => Point3::new(0.0, 5.0, 0.0),
            ViewPreset::Bottom => Point3::new(0.0, -5.0, 0.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewPreset::Iso => "iso",
            ViewPreset::Front => "front",
            ViewPreset::Back => "back",
            ViewPreset::Left => "left",
            ViewPreset::Right => "right",
            ViewPreset::Top => "top",
            ViewPreset::Bottom => "bottom",
        }
    }

    /// Parse a preset name as used by the JS API.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "iso" => Some(ViewPreset::Iso),
            "front" => Some(ViewPreset::Front),
            "back" => Some(ViewPreset::Back),
            "left" => Some(ViewPreset::Left),
            "right" => Some(ViewPreset::Right),
            "top" => Some(ViewPreset::Top),
            "bottom" => Some(ViewPreset::Bottom),
            _ => None,
        }
    }
}

/// Actions bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    /// Move to a preset in perspective.
    ApplyPreset(ViewPreset),
    /// Move to the iso view and flip between perspective and orthographic.
    ToggleOrtho,
    /// Show or hide the transform gizmo.
    ToggleTransform,
    /// Leave pivot-change mode, restoring the previous pivot.
    CancelPivot,
}

impl ViewerCommand {
    /// Map a `KeyboardEvent.key` value to a command.
    pub fn from_key(key: &str) -> Option<Self> {
        let command = match key {
            "1" => ViewerCommand::ApplyPreset(ViewPreset::Front),
            "6" => ViewerCommand::ApplyPreset(ViewPreset::Back),
            "4" => ViewerCommand::ApplyPreset(ViewPreset::Left),
            "3" => ViewerCommand::ApplyPreset(ViewPreset::Right),
            "5" => ViewerCommand::ApplyPreset(ViewPreset::Bottom),
            "2" => ViewerCommand::ApplyPreset(ViewPreset::Top),
            "0" => ViewerCommand::ToggleOrtho,
            "m" | "M" => ViewerCommand::ToggleTransform,
            "Escape" => ViewerCommand::CancelPivot,
            _ => return None,
        };
        Some(command)
    }
}

/// Boolean display options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayToggle {
    Ortho,
    Grid,
    Wireframe,
    Transparency,
    Axes,
    OriginAxes,
    Transform,
}

impl DisplayToggle {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ortho" => Some(DisplayToggle::Ortho),
            "grid" => Some(DisplayToggle::Grid),
            "wireframe" => Some(DisplayToggle::Wireframe),
            "transparency" => Some(DisplayToggle::Transparency),
            "axes" => Some(DisplayToggle::Axes),
            "originAxes" => Some(DisplayToggle::OriginAxes),
            "transform" => Some(DisplayToggle::Transform),
            _ => None,
        }
    }
}

/// Current display options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    pub use_ortho: bool,
    pub show_grid: bool,
    pub show_wireframe: bool,
    pub show_transparency: bool,
    pub show_axes: bool,
    pub show_origin_axes: bool,
    pub show_transform: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            use_ortho: false,
            show_grid: false,
            show_wireframe: false,
            show_transparency: false,
            show_axes: true,
            show_origin_axes: false,
            show_transform: false,
        }
    }
}

impl DisplaySettings {
    fn flag_mut(&mut self, toggle: DisplayToggle) -> &mut bool {
        match toggle {
            DisplayToggle::Ortho => &mut self.use_ortho,
            DisplayToggle::Grid => &mut self.show_grid,
            DisplayToggle::Wireframe => &mut self.show_wireframe,
            DisplayToggle::Transparency => &mut self.show_transparency,
            DisplayToggle::Axes => &mut self.show_axes,
            DisplayToggle::OriginAxes => &mut self.show_origin_axes,
            DisplayToggle::Transform => &mut self.show_transform,
        }
    }

    /// Flip an option and return its new value.
    pub fn toggle(&mut self, toggle: DisplayToggle) -> bool {
        let flag = self.flag_mut(toggle);
        *flag = !*flag;
        *flag
    }
}

pub const SELECTED_COLOR: &str = "#4A90E2";
pub const DEFAULT_COLOR: &str = "orange";

/// How the renderer should draw an object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectAppearance {
    pub color: &'static str,
    pub opacity: f64,
    pub transparent: bool,
    pub wireframe: bool,
    pub show_edges: bool,
}

impl ObjectAppearance {
    pub fn resolve(selected: bool, display: &DisplaySettings) -> Self {
        let opacity = if selected || display.show_transparency {
            0.5
        } else {
            1.0
        };
        Self {
            color: if selected { SELECTED_COLOR } else { DEFAULT_COLOR },
            opacity,
            transparent: opacity < 1.0,
            wireframe: display.show_wireframe,
            show_edges: selected,
        }
    }
}
