// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene objects
//!
//! A flat list of named, transformable objects. Bounds are derived from the
//! geometry and world matrix on every query and never cached, so edits made
//! through the transform gizmo are always reflected.

use crate::error::{Error, Result};
use nalgebra::Matrix4;
use rustc_hash::FxHashMap;
use sceneview_geometry::{intersect_mesh, BoundingBox, Intersection, Mesh, Ray, Transform};

/// Stable handle of an object in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// A named object with a transform and optional geometry.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    /// Objects without geometry can be selected by name but cannot be
    /// framed or hit by rays.
    pub mesh: Option<Mesh>,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, mesh: Option<Mesh>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            mesh,
            visible: true,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    pub fn world_matrix(&self) -> Matrix4<f64> {
        self.transform.matrix()
    }

    /// World-space AABB of the geometry, `None` without renderable geometry.
    pub fn world_bounds(&self) -> Option<BoundingBox> {
        let mesh = self.mesh.as_ref()?;
        let local = mesh.bounds();
        if local.is_empty() {
            return None;
        }
        Some(local.transformed(&self.world_matrix()))
    }

    /// Nearest ray hit on this object's geometry.
    pub fn intersect(&self, ray: &Ray) -> Result<Option<Intersection>> {
        match &self.mesh {
            Some(mesh) if self.visible => Ok(intersect_mesh(ray, mesh, &self.world_matrix())?),
            _ => Ok(None),
        }
    }
}

/// Objects in insertion order with a name index.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
    by_name: FxHashMap<String, ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object. Names must be unique and the mesh, if any, valid.
    pub fn add(&mut self, object: SceneObject) -> Result<ObjectId> {
        if self.by_name.contains_key(&object.name) {
            return Err(Error::DuplicateObject(object.name));
        }
        if let Some(mesh) = &object.mesh {
            mesh.validate()?;
        }
        let id = ObjectId(self.objects.len());
        self.by_name.insert(object.name.clone(), id);
        self.objects.push(object);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    /// Resolve a name to an id.
    pub fn find(&self, name: &str) -> Result<ObjectId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownObject(name.to_string()))
    }

    pub fn get_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.by_name.get(name).and_then(|id| self.get(*id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(i, object)| (ObjectId(i), object))
    }

    /// Union of the world bounds of every visible object with geometry.
    pub fn world_bounds(&self) -> Option<BoundingBox> {
        self.objects
            .iter()
            .filter(|object| object.visible)
            .filter_map(SceneObject::world_bounds)
            .reduce(|a, b| a.union(&b))
    }

    /// Nearest object hit by `ray`.
    ///
    /// Objects whose geometry was corrupted after insertion are skipped.
    pub fn pick(&self, ray: &Ray) -> Option<(ObjectId, Intersection)> {
        let mut nearest: Option<(ObjectId, Intersection)> = None;
        for (id, object) in self.iter() {
            let hit = match object.intersect(ray) {
                Ok(Some(hit)) => hit,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(object = %object.name, error = %e, "Skipping object in pick");
                    continue;
                }
            };
            if nearest.map_or(true, |(_, best)| hit.distance < best.distance) {
                nearest = Some((id, hit));
            }
        }
        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    fn cube(name: &str, x: f64) -> SceneObject {
        SceneObject::new(name, Some(Mesh::cuboid(2.0, 2.0, 2.0)))
            .with_transform(Transform::from_position(Vector3::new(x, 0.0, 0.0)))
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut scene = Scene::new();
        scene.add(cube("box", 0.0)).unwrap();
        assert!(matches!(
            scene.add(cube("box", 1.0)),
            Err(Error::DuplicateObject(name)) if name == "box"
        ));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_lookup_by_name() {
        let mut scene = Scene::new();
        let a = scene.add(cube("a", 0.0)).unwrap();
        let b = scene.add(cube("b", 5.0)).unwrap();
        assert_eq!(scene.find("b").unwrap(), b);
        assert_eq!(scene.get_by_name("a").map(|o| o.name.as_str()), Some("a"));
        assert_ne!(a, b);
        assert!(matches!(scene.find("c"), Err(Error::UnknownObject(_))));
    }

    #[test]
    fn test_world_bounds_follow_transform() {
        let object = SceneObject::new("box", Some(Mesh::cuboid(2.0, 2.0, 2.0))).with_transform(
            Transform::from_parts([1.0, 2.0, 3.0], [0.0, 0.0, 0.0], 2.0),
        );
        let bounds = object.world_bounds().unwrap();
        assert_relative_eq!(bounds.min, Point3::new(-1.0, 0.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.max, Point3::new(3.0, 4.0, 5.0), epsilon = 1e-6);
    }

    #[test]
    fn test_no_geometry_no_bounds() {
        assert!(SceneObject::new("empty", None).world_bounds().is_none());
        assert!(SceneObject::new("blank", Some(Mesh::new()))
            .world_bounds()
            .is_none());
    }

    #[test]
    fn test_scene_bounds_union() {
        let mut scene = Scene::new();
        assert!(scene.world_bounds().is_none());
        scene.add(cube("a", 0.0)).unwrap();
        scene.add(cube("b", 10.0)).unwrap();
        scene.add(SceneObject::new("marker", None)).unwrap();

        let bounds = scene.world_bounds().unwrap();
        assert_relative_eq!(bounds.min.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max.x, 11.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pick_returns_nearest_object() {
        let mut scene = Scene::new();
        let near = scene.add(cube("near", 0.0)).unwrap();
        scene.add(cube("far", -10.0)).unwrap();

        let ray = Ray::new(Point3::new(10.0, 0.3, 0.2), -Vector3::x()).unwrap();
        let (id, hit) = scene.pick(&ray).unwrap();
        assert_eq!(id, near);
        assert_relative_eq!(hit.distance, 9.0, epsilon = 1e-6);

        let miss = Ray::new(Point3::new(10.0, 5.0, 0.0), -Vector3::x()).unwrap();
        assert!(scene.pick(&miss).is_none());
    }

    #[test]
    fn test_invalid_mesh_rejected_on_add() {
        let mut scene = Scene::new();
        let bad = Mesh {
            positions: vec![0.0; 3],
            normals: vec![0.0, 0.0, 1.0],
            indices: vec![0, 0, 9],
        };
        assert!(matches!(
            scene.add(SceneObject::new("bad", Some(bad))),
            Err(Error::Geometry(sceneview_geometry::Error::InvalidMesh(_)))
        ));
        assert!(scene.is_empty());
        assert!(scene.find("bad").is_err());
    }

    #[test]
    fn test_corrupted_mesh_does_not_block_pick() {
        let mut scene = Scene::new();
        let good = scene.add(cube("good", 0.0)).unwrap();
        let bad = scene.add(cube("bad", 20.0)).unwrap();
        scene.get_mut(bad).unwrap().mesh.as_mut().unwrap().indices[2] = 999;

        let ray = Ray::new(Point3::new(10.0, 0.3, 0.2), -Vector3::x()).unwrap();
        let (id, _) = scene.pick(&ray).unwrap();
        assert_eq!(id, good);
    }

    #[test]
    fn test_hidden_objects_are_not_picked() {
        let mut scene = Scene::new();
        let id = scene.add(cube("box", 0.0)).unwrap();
        scene.get_mut(id).unwrap().visible = false;

        let ray = Ray::new(Point3::new(10.0, 0.3, 0.2), -Vector3::x()).unwrap();
        assert!(scene.pick(&ray).is_none());
    }
}
