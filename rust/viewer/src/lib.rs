// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # SceneView Viewer
//!
//! Camera and interaction logic for the SceneView 3D viewer: perspective and
//! orthographic cameras, orbit controls, fit-to-screen framing and the 27
//! pivot anchors an object can be rotated about.
//!
//! ## Quick Start
//!
//! ```rust
//! use sceneview_viewer::{Viewer, ViewerConfig, SceneObject, PointerPosition};
//! use sceneview_geometry::Mesh;
//!
//! let mut viewer = Viewer::new(ViewerConfig::default(), 800.0, 600.0)?;
//! let id = viewer.add_object(SceneObject::new("box", Some(Mesh::cuboid(2.0, 2.0, 2.0))))?;
//! viewer.select(Some(id))?;
//!
//! // Frame the selected box
//! let fit = viewer.fit_to_screen()?;
//! assert!(fit.distance > 0.0);
//!
//! // Pick a new pivot with the pointer, Escape would roll it back
//! viewer.begin_pivot_change();
//! viewer.pointer_move(PointerPosition::new(420.0, 280.0))?;
//! viewer.click(PointerPosition::new(420.0, 280.0))?;
//! # Ok::<(), sceneview_viewer::Error>(())
//! ```

pub mod camera;
pub mod config;
pub mod controls;
pub mod error;
pub mod framing;
pub mod pivot;
pub mod resolver;
pub mod scene;
pub mod view;
pub mod viewer;

pub use camera::{Camera, Projection, Viewport};
pub use config::ViewerConfig;
pub use controls::OrbitControls;
pub use error::{Error, Result};
pub use framing::{fit_bounds, fit_to_screen, framing_distance, FitOutcome};
pub use pivot::{AnchorCategory, PivotAnchor, PivotMode, PivotSelection, PIVOT_ANCHORS};
pub use resolver::{nearest_anchor, resolve_pivot, to_ndc, PointerPosition};
pub use scene::{ObjectId, Scene, SceneObject};
pub use view::{DisplaySettings, DisplayToggle, ObjectAppearance, ViewPreset, ViewerCommand};
pub use viewer::{ClickOutcome, Viewer};
