// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray casting against triangle meshes

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use nalgebra::{Matrix4, Point3, Vector3};
use smallvec::SmallVec;

/// Determinant threshold below which a ray counts as parallel to a triangle
const PARALLEL_EPSILON: f64 = 1e-12;

/// Half-line with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Create a ray; the direction is normalized
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Result<Self> {
        let direction = direction
            .try_normalize(f64::EPSILON)
            .ok_or_else(|| Error::InvalidRay("zero-length direction".to_string()))?;
        if !origin.coords.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidRay("non-finite origin".to_string()));
        }
        Ok(Self { origin, direction })
    }

    /// Point at parameter `t` along the ray
    #[inline]
    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// Möller–Trumbore ray-triangle intersection test.
    ///
    /// Returns the ray parameter of the hit. Both windings are accepted;
    /// hits behind the origin are rejected.
    pub fn intersect_triangle(
        &self,
        v0: &Point3<f64>,
        v1: &Point3<f64>,
        v2: &Point3<f64>,
    ) -> Option<f64> {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let h = self.direction.cross(&edge2);
        let a = edge1.dot(&h);

        if a.abs() < PARALLEL_EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = self.origin - v0;
        let u = f * s.dot(&h);

        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * self.direction.dot(&q);

        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        (t > PARALLEL_EPSILON).then_some(t)
    }
}

/// A ray hit on a mesh, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Hit point in world space
    pub point: Point3<f64>,
    /// Distance from the ray origin
    pub distance: f64,
    /// Index of the triangle that was hit
    pub triangle: usize,
}

/// All hits of `ray` on `mesh` placed by `world_matrix`, nearest first
pub fn intersect_mesh_all(
    ray: &Ray,
    mesh: &Mesh,
    world_matrix: &Matrix4<f64>,
) -> Result<SmallVec<[Intersection; 4]>> {
    let mut hits: SmallVec<[Intersection; 4]> = SmallVec::new();

    for (triangle, vertices) in mesh.triangles().enumerate() {
        let [a, b, c] = vertices?;
        let (a, b, c) = (
            world_matrix.transform_point(&a),
            world_matrix.transform_point(&b),
            world_matrix.transform_point(&c),
        );

        if let Some(t) = ray.intersect_triangle(&a, &b, &c) {
            hits.push(Intersection {
                point: ray.at(t),
                distance: t,
                triangle,
            });
        }
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    Ok(hits)
}

/// Nearest hit of `ray` on `mesh` placed by `world_matrix`
pub fn intersect_mesh(
    ray: &Ray,
    mesh: &Mesh,
    world_matrix: &Matrix4<f64>,
) -> Result<Option<Intersection>> {
    Ok(intersect_mesh_all(ray, mesh, world_matrix)?
        .into_iter()
        .next())
}
