//! SceneView Geometry
//!
//! Bounding boxes, triangle meshes, object transforms and ray casting for the
//! SceneView viewer, built on nalgebra.

pub mod bounds;
pub mod error;
pub mod mesh;
pub mod ray;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

pub use bounds::BoundingBox;
pub use error::{Error, Result};
pub use mesh::Mesh;
pub use ray::{intersect_mesh, intersect_mesh_all, Intersection, Ray};
pub use transform::{euler_to_rotation, transform_point, transform_vector, Transform};
