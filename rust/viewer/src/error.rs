// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for viewer operations.

/// Result type alias for viewer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the viewer.
///
/// None of these are fatal: callers log them and leave the camera and pivot
/// state as they were.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fit-to-screen was invoked without an object that has renderable geometry.
    #[error("no target with renderable geometry to frame")]
    NoTarget,

    /// No object with the given name exists in the scene.
    #[error("unknown object: {0}")]
    UnknownObject(String),

    /// An object with the given name is already in the scene.
    #[error("duplicate object name: {0}")]
    DuplicateObject(String),

    /// The viewport has a zero or non-finite dimension.
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Geometry layer error (bad mesh, degenerate ray).
    #[error("geometry error: {0}")]
    Geometry(#[from] sceneview_geometry::Error),
}
