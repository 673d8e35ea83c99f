// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mesh data structures

use crate::bounds::BoundingBox;
use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};

/// Triangle mesh
///
/// Buffers are flat and f32 so they can be handed to the renderer as-is.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Build a mesh from flat renderer buffers.
    ///
    /// Empty `normals` are filled with area-weighted vertex normals. The
    /// result is validated before it is returned.
    pub fn from_buffers(positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u32>) -> Result<Self> {
        let fill_normals = normals.is_empty() && !positions.is_empty();
        let mut mesh = Self {
            positions,
            normals,
            indices,
        };
        if fill_normals {
            mesh.normals = vec![0.0; mesh.positions.len()];
            mesh.validate()?;
            mesh.compute_normals()?;
        }
        mesh.validate()?;
        Ok(mesh)
    }

    /// Check buffer lengths and that every index addresses a vertex.
    pub fn validate(&self) -> Result<()> {
        if self.positions.len() % 3 != 0 {
            return Err(Error::InvalidMesh(format!(
                "position buffer length {} is not a multiple of 3",
                self.positions.len()
            )));
        }
        if self.normals.len() != self.positions.len() {
            return Err(Error::InvalidMesh(format!(
                "{} normal components for {} position components",
                self.normals.len(),
                self.positions.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(Error::InvalidMesh(format!(
                "index buffer length {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        let vertex_count = self.vertex_count();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(Error::InvalidMesh(format!(
                "index {} out of range for {} vertices",
                bad, vertex_count
            )));
        }
        Ok(())
    }

    /// Recompute vertex normals from the triangles
    fn compute_normals(&mut self) -> Result<()> {
        let mut accumulated = vec![Vector3::<f64>::zeros(); self.vertex_count()];
        for tri in self.indices.chunks_exact(3) {
            let fetch = |i: u32| {
                self.vertex(i as usize)
                    .ok_or_else(|| Error::InvalidMesh(format!("index {} out of range", i)))
            };
            let (a, b, c) = (fetch(tri[0])?, fetch(tri[1])?, fetch(tri[2])?);
            // cross product length is twice the area, so larger faces weigh more
            let face = (b - a).cross(&(c - a));
            for &i in tri {
                accumulated[i as usize] += face;
            }
        }

        for (chunk, normal) in self.normals.chunks_exact_mut(3).zip(accumulated) {
            let normal = normal.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
            chunk[0] = normal.x as f32;
            chunk[1] = normal.y as f32;
            chunk[2] = normal.z as f32;
        }
        Ok(())
    }

    /// Axis-aligned box centered on the origin
    ///
    /// Four vertices per face so every face keeps a flat normal. A 2x2x2 cube
    /// spans exactly [-1, 1] on each axis, matching the pivot anchor grid.
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
        let mut mesh = Mesh::with_capacity(24, 36);

        // (normal, u axis, v axis); u x v == normal keeps CCW winding outward
        let faces: [(Vector3<f64>, Vector3<f64>, Vector3<f64>); 6] = [
            (Vector3::x(), -Vector3::z(), Vector3::y()),
            (-Vector3::x(), Vector3::z(), Vector3::y()),
            (Vector3::y(), Vector3::x(), -Vector3::z()),
            (-Vector3::y(), Vector3::x(), Vector3::z()),
            (Vector3::z(), Vector3::x(), Vector3::y()),
            (-Vector3::z(), -Vector3::x(), Vector3::y()),
        ];
        let half = Vector3::new(hx, hy, hz);

        for (normal, u, v) in faces {
            let base = mesh.vertex_count() as u32;
            let center = normal.component_mul(&half);
            let du = u.component_mul(&half);
            let dv = v.component_mul(&half);

            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let corner = center + du * su + dv * sv;
                mesh.add_vertex(Point3::from(corner), normal);
            }

            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }

        mesh
    }

    /// Add a vertex with normal
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions.push(position.x as f32);
        self.positions.push(position.y as f32);
        self.positions.push(position.z as f32);

        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
    }

    /// Add a triangle
    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Vertex position at `index` in f64
    #[inline]
    pub fn vertex(&self, index: usize) -> Option<Point3<f64>> {
        let chunk = self.positions.get(index * 3..index * 3 + 3)?;
        Some(Point3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64))
    }

    /// Local-space bounds (empty box for an empty mesh)
    pub fn bounds(&self) -> BoundingBox {
        let mut bounds = BoundingBox::empty();
        self.positions.chunks_exact(3).for_each(|chunk| {
            bounds.expand_by_point(&Point3::new(
                chunk[0] as f64,
                chunk[1] as f64,
                chunk[2] as f64,
            ));
        });
        bounds
    }

    /// Iterate triangles as vertex triples
    ///
    /// Fails on the first index that points past the vertex buffer.
    pub fn triangles(&self) -> impl Iterator<Item = Result<[Point3<f64>; 3]>> + '_ {
        self.indices.chunks_exact(3).map(move |tri| {
            let fetch = |i: u32| {
                self.vertex(i as usize).ok_or_else(|| {
                    Error::InvalidMesh(format!(
                        "index {} out of range for {} vertices",
                        i,
                        self.vertex_count()
                    ))
                })
            };
            Ok([fetch(tri[0])?, fetch(tri[1])?, fetch(tri[2])?])
        })
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.bounds().is_empty());
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(1.0, 2.0, 3.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.positions, vec![1.0, 2.0, 3.0]);
        assert_eq!(mesh.normals, vec![0.0, 0.0, 1.0]);
        assert_eq!(mesh.vertex(0), Some(Point3::new(1.0, 2.0, 3.0)));
        assert_eq!(mesh.vertex(1), None);
    }

    #[test]
    fn test_cuboid_layout() {
        let cube = Mesh::cuboid(2.0, 2.0, 2.0);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);

        let bounds = cube.bounds();
        assert_relative_eq!(bounds.min, Point3::new(-1.0, -1.0, -1.0));
        assert_relative_eq!(bounds.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_cuboid_winding_faces_outward() {
        let cube = Mesh::cuboid(1.0, 2.0, 3.0);
        for triangle in cube.triangles() {
            let [a, b, c] = triangle.unwrap();
            let normal = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(normal.dot(&centroid) > 0.0, "inward facing triangle");
        }
    }

    #[test]
    fn test_from_buffers_rejects_bad_index() {
        let result = Mesh::from_buffers(vec![0.0; 3], vec![0.0, 0.0, 1.0], vec![0, 0, 9]);
        assert!(matches!(result, Err(Error::InvalidMesh(msg)) if msg.contains("index 9")));
    }

    #[test]
    fn test_from_buffers_rejects_mismatched_normals() {
        let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let result = Mesh::from_buffers(positions, vec![0.0, 0.0, 1.0], vec![0, 1, 2]);
        assert!(matches!(result, Err(Error::InvalidMesh(_))));
    }

    #[test]
    fn test_from_buffers_fills_missing_normals() {
        let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let mesh = Mesh::from_buffers(positions, Vec::new(), vec![0, 1, 2]).unwrap();
        assert_eq!(mesh.normals.len(), 9);
        for normal in mesh.normals.chunks_exact(3) {
            assert_relative_eq!(normal[2], 1.0);
        }
    }

    #[test]
    fn test_cuboid_is_valid() {
        Mesh::cuboid(1.0, 2.0, 3.0).validate().unwrap();
    }

    #[test]
    fn test_triangles_reports_bad_index() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::origin(), Vector3::z());
        mesh.add_triangle(0, 0, 5);

        let result: Result<Vec<_>> = mesh.triangles().collect();
        assert!(matches!(result, Err(Error::InvalidMesh(_))));
    }
}
