// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer configuration.
//!
//! Every field has a default, so partial JSON (or a partial JS object on the
//! wasm side) only overrides what it names.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Vertical field of view of the perspective camera, in degrees.
    pub fov_deg: f64,
    /// Near clipping plane.
    pub near: f64,
    /// Far clipping plane.
    pub far: f64,
    /// Pixels per world unit for the orthographic camera.
    pub ortho_zoom: f64,
    /// Camera position before any preset or fit is applied.
    pub initial_camera_position: [f64; 3],
    /// Orbit controls never move the camera closer than this to the target.
    pub min_distance: f64,
    /// Orbit controls never move the camera further than this from the target.
    pub max_distance: f64,
    /// Multiplier applied to the framing distance to keep a margin around the target.
    pub fit_padding: f64,
    /// Framing distance per unit of extent for the orthographic camera.
    pub ortho_distance_factor: f64,
    /// Camera offset from the target center, per unit of framing distance.
    pub fit_direction: [f64; 3],
    /// Lower bound for the framed extent (guards point-like targets).
    pub min_extent: f64,
    /// Added to the hit distance of corner anchors.
    pub corner_penalty: f64,
    /// Added to the hit distance of edge anchors.
    pub edge_penalty: f64,
    /// Added to the hit distance of face anchors.
    pub face_penalty: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov_deg: 50.0,
            near: 0.1,
            far: 1000.0,
            ortho_zoom: 100.0,
            initial_camera_position: [3.0, 3.0, 3.0],
            min_distance: 1.0,
            max_distance: 1000.0,
            fit_padding: 3.0,
            ortho_distance_factor: 2.0,
            fit_direction: [0.5, 0.5, 0.5],
            min_extent: 1e-6,
            corner_penalty: 0.0,
            edge_penalty: 0.25,
            face_penalty: 0.5,
        }
    }
}

impl ViewerConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make framing or projection meaningless.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("near", self.near),
            ("far", self.far),
            ("orthoZoom", self.ortho_zoom),
            ("fitPadding", self.fit_padding),
            ("orthoDistanceFactor", self.ortho_distance_factor),
            ("minExtent", self.min_extent),
            ("maxDistance", self.max_distance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }

        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(Error::InvalidConfig(format!(
                "fovDeg must be in (0, 180), got {}",
                self.fov_deg
            )));
        }
        if self.near >= self.far {
            return Err(Error::InvalidConfig(format!(
                "near ({}) must be smaller than far ({})",
                self.near, self.far
            )));
        }
        if !(self.min_distance >= 0.0 && self.min_distance <= self.max_distance) {
            return Err(Error::InvalidConfig(format!(
                "minDistance must be in [0, maxDistance], got {}",
                self.min_distance
            )));
        }

        let direction_len = self.fit_direction.iter().map(|c| c * c).sum::<f64>().sqrt();
        if !(direction_len.is_finite() && direction_len > 0.0) {
            return Err(Error::InvalidConfig(
                "fitDirection must be a non-zero vector".to_string(),
            ));
        }

        let penalties = [self.corner_penalty, self.edge_penalty, self.face_penalty];
        if penalties.iter().any(|p| !(p.is_finite() && *p >= 0.0)) {
            return Err(Error::InvalidConfig(format!(
                "anchor penalties must be finite and non-negative, got {:?}",
                penalties
            )));
        }
        // corners are preferred over edges, edges over faces
        if !(self.corner_penalty <= self.edge_penalty && self.edge_penalty <= self.face_penalty) {
            return Err(Error::InvalidConfig(format!(
                "anchor penalties must satisfy corner <= edge <= face, got {:?}",
                penalties
            )));
        }

        if self.initial_camera_position.iter().any(|c| !c.is_finite()) {
            return Err(Error::InvalidConfig(
                "initialCameraPosition must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        ViewerConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "fovDeg": 35, "fitPadding": 2.5 }"#).unwrap();
        assert_eq!(config.fov_deg, 35.0);
        assert_eq!(config.fit_padding, 2.5);
        assert_eq!(config.edge_penalty, 0.25);
        assert_eq!(config.initial_camera_position, [3.0, 3.0, 3.0]);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "fitPadding": 0 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "near": 5, "far": 1 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "fitDirection": [0, 0, 0] }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "fovDeg": 180 }"#),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_bad_penalties() {
        for json in [
            r#"{ "edgePenalty": -0.1 }"#,
            r#"{ "cornerPenalty": 0.3 }"#,
            r#"{ "facePenalty": 0.1 }"#,
        ] {
            assert!(
                matches!(ViewerConfig::from_json(json), Err(Error::InvalidConfig(_))),
                "{} accepted",
                json
            );
        }

        let config = ViewerConfig {
            face_penalty: f64::NAN,
            ..ViewerConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        ViewerConfig::from_json(r#"{ "edgePenalty": 0, "facePenalty": 0 }"#).unwrap();
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            ViewerConfig::from_json("{ not json"),
            Err(Error::ConfigParse(_))
        ));
    }
}
