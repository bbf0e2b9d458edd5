//! Islands of several objects, managed for the length of one operator call.

use std::collections::BTreeSet;

use log::{debug, warn};
use nalgebra::Vector2;

use super::{find_islands, Island, IslandOptions};
use crate::error::Result;
use crate::geometry::{cmp_sort_keys, Axis3, Orientation, UvAxis, UvBounds};
use crate::host::EditorHost;
use crate::mesh::{MeshIndex, UvLayerId};
use crate::scene::{ObjectId, Scene};
use crate::selection::MeshSelectionSnapshot;

/// Per-object state kept by the manager.
#[derive(Debug, Clone)]
struct ObjectEntry {
    object: ObjectId,
    layer: UvLayerId,
    /// 3D selection before any probing.
    original_selection: MeshSelectionSnapshot,
}

/// All islands found on a set of objects.
///
/// Islands live in one flat list in discovery order. Grouping by object is
/// derived from each island's [`Island::object`], so sorting or removing
/// through the manager keeps both views consistent.
#[derive(Debug, Clone)]
pub struct IslandManager<I: MeshIndex = u32> {
    islands: Vec<Island<I>>,
    objects: Vec<ObjectEntry>,
    options: IslandOptions,
}

impl<I: MeshIndex> IslandManager<I> {
    /// Discover islands on every listed object.
    ///
    /// Objects without an active UV layer are skipped, as are repeated ids.
    /// Under sync with
    /// `extend`, the 3D selection is first grown to UV-delimited linked
    /// geometry; the original selection is kept for
    /// [`IslandManager::restore_vertex_selection`].
    ///
    /// If a host primitive fails, every object processed so far gets its
    /// original 3D selection back before the error is returned.
    pub fn new<H>(
        scene: &mut Scene<I>,
        host: &mut H,
        objects: &[ObjectId],
        options: IslandOptions,
    ) -> Result<Self>
    where
        H: EditorHost<I> + ?Sized,
    {
        let mut manager = Self {
            islands: Vec::new(),
            objects: Vec::new(),
            options,
        };

        let mut seen = BTreeSet::new();
        for &object in objects {
            if !seen.insert(object) {
                continue;
            }
            if let Err(err) = manager.add_object(scene, host, object) {
                if let Err(restore_err) = manager.restore_vertex_selection(scene) {
                    warn!("selection not restored after {}: {}", err, restore_err);
                }
                return Err(err);
            }
        }

        debug!(
            "island manager: {} islands on {} objects",
            manager.islands.len(),
            manager.objects.len()
        );
        Ok(manager)
    }

    /// Discover islands on every object in the scene.
    pub fn from_scene<H>(scene: &mut Scene<I>, host: &mut H, options: IslandOptions) -> Result<Self>
    where
        H: EditorHost<I> + ?Sized,
    {
        let objects: Vec<ObjectId> = scene.object_ids().collect();
        Self::new(scene, host, &objects, options)
    }

    fn add_object<H>(&mut self, scene: &mut Scene<I>, host: &mut H, object: ObjectId) -> Result<()>
    where
        H: EditorHost<I> + ?Sized,
    {
        let mesh = scene.mesh_mut(object)?;
        let Some(layer) = mesh.active_uv_layer() else {
            debug!("skipping {:?}: no uv layer", object);
            return Ok(());
        };

        let original_selection = MeshSelectionSnapshot::capture(mesh);
        let first_id = self.islands.iter().map(|i| i.id() + 1).max().unwrap_or(0);
        let options = self.options;

        let found = if options.sync && options.extend && !options.find_all {
            host.select_linked_mesh(mesh, Some(layer))
                .and_then(|()| find_islands(mesh, layer, object, host, &options, first_id))
        } else {
            find_islands(mesh, layer, object, host, &options, first_id)
        };

        match found {
            Ok(islands) => {
                self.islands.extend(islands);
                self.objects.push(ObjectEntry {
                    object,
                    layer,
                    original_selection,
                });
                Ok(())
            }
            Err(err) => {
                original_selection.restore(mesh);
                Err(err)
            }
        }
    }

    /// Options the islands were discovered with.
    #[inline]
    pub fn options(&self) -> &IslandOptions {
        &self.options
    }

    /// Number of islands.
    #[inline]
    pub fn len(&self) -> usize {
        self.islands.len()
    }

    /// Check if no island was found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    /// All islands, in the current order.
    #[inline]
    pub fn islands(&self) -> &[Island<I>] {
        &self.islands
    }

    /// Iterate over islands.
    pub fn iter(&self) -> impl Iterator<Item = &Island<I>> {
        self.islands.iter()
    }

    /// Iterate mutably over islands.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Island<I>> {
        self.islands.iter_mut()
    }

    /// Islands of one object, in the current order.
    pub fn islands_of(&self, object: ObjectId) -> impl Iterator<Item = &Island<I>> {
        self.islands.iter().filter(move |i| i.object() == object)
    }

    /// Objects with a UV layer, and that layer, in processing order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, UvLayerId)> + '_ {
        self.objects.iter().map(|e| (e.object, e.layer))
    }

    /// Island by id.
    pub fn get(&self, id: usize) -> Option<&Island<I>> {
        self.islands.iter().find(|i| i.id() == id)
    }

    /// Mutable island by id.
    pub fn get_mut(&mut self, id: usize) -> Option<&mut Island<I>> {
        self.islands.iter_mut().find(|i| i.id() == id)
    }

    /// Sort islands by a key. The sort is stable; NaN keys sort last.
    pub fn sort_all_islands<F>(&mut self, mut key: F, reverse: bool)
    where
        F: FnMut(&Island<I>) -> f64,
    {
        let mut keyed: Vec<(f64, Island<I>)> =
            self.islands.drain(..).map(|i| (key(&i), i)).collect();
        keyed.sort_by(|a, b| cmp_sort_keys(a.0, b.0, reverse));
        self.islands = keyed.into_iter().map(|(_, i)| i).collect();
    }

    /// 3D axis along which island centers spread the most.
    pub fn get_axis_3d(&self, scene: &Scene<I>, orientation: Orientation) -> Result<Axis3> {
        let mut centers = Vec::with_capacity(self.islands.len());
        for island in &self.islands {
            centers.push(island.center_3d(scene.object(island.object())?, orientation));
        }
        Ok(Axis3::of_largest_spread(centers))
    }

    /// UV axis along which island centers spread the most.
    pub fn get_axis_uv(&self) -> UvAxis {
        UvAxis::of_largest_spread(self.islands.iter().map(|i| i.center()))
    }

    /// Remove an island, returning it.
    pub fn remove_island(&mut self, id: usize) -> Option<Island<I>> {
        let pos = self.islands.iter().position(|i| i.id() == id)?;
        Some(self.islands.remove(pos))
    }

    /// Keep only the islands for which `f` returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Island<I>) -> bool,
    {
        self.islands.retain(f);
    }

    /// Union of all island bounds, or the zero box when empty.
    pub fn bounds(&self) -> UvBounds {
        let mut iter = self.islands.iter();
        let Some(first) = iter.next() else {
            return UvBounds::default();
        };
        iter.fold(*first.bounds(), |acc, i| acc.union(i.bounds()))
    }

    /// Recompute every island's bounds.
    pub fn update_bounds(&mut self, scene: &Scene<I>) -> Result<()> {
        for island in &mut self.islands {
            island.update_bounds(scene.mesh(island.object())?);
        }
        Ok(())
    }

    /// Translate every island.
    pub fn move_all(&mut self, scene: &mut Scene<I>, offset: Vector2<f64>) -> Result<()> {
        for island in &mut self.islands {
            island.move_by(scene.mesh_mut(island.object())?, offset);
        }
        Ok(())
    }

    /// Checkpoint every island's UV selection.
    pub fn store_selection(&mut self, scene: &Scene<I>) -> Result<()> {
        for island in &mut self.islands {
            island.store_selection(scene.mesh(island.object())?);
        }
        Ok(())
    }

    /// Revert every island to its checkpointed UV selection.
    pub fn restore_selection(&self, scene: &mut Scene<I>) -> Result<()> {
        for island in &self.islands {
            island.restore_selection(scene.mesh_mut(island.object())?);
        }
        Ok(())
    }

    /// UV-select every island.
    pub fn select_all_uv(&self, scene: &mut Scene<I>) -> Result<()> {
        for island in &self.islands {
            island.select_all_uv(scene.mesh_mut(island.object())?);
        }
        Ok(())
    }

    /// UV-deselect every island.
    pub fn deselect_all_uv(&self, scene: &mut Scene<I>) -> Result<()> {
        for island in &self.islands {
            island.deselect_all_uv(scene.mesh_mut(island.object())?);
        }
        Ok(())
    }

    /// Commit every object that still has islands, once per object.
    pub fn update_uvmeshes<H>(&self, scene: &Scene<I>, host: &mut H) -> Result<()>
    where
        H: EditorHost<I> + ?Sized,
    {
        let touched: BTreeSet<ObjectId> = self.islands.iter().map(|i| i.object()).collect();
        for object in touched {
            host.update_mesh(object, scene.mesh(object)?)?;
        }
        Ok(())
    }

    /// Put back the 3D selection every object had before discovery.
    pub fn restore_vertex_selection(&self, scene: &mut Scene<I>) -> Result<()> {
        for entry in &self.objects {
            entry.original_selection.restore(scene.mesh_mut(entry.object)?);
        }
        Ok(())
    }
}

impl<'a, I: MeshIndex> IntoIterator for &'a IslandManager<I> {
    type Item = &'a Island<I>;
    type IntoIter = std::slice::Iter<'a, Island<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.islands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UvError;
    use crate::fixtures::{grid, split_quad};
    use crate::host::NativeHost;
    use crate::mesh::{EdgeId, UvMesh, VertexId};
    use nalgebra::{Matrix4, Point2, Vector3};

    /// Grid with a seam column at x = `at`.
    fn seamed_grid(n: usize, at: f64) -> UvMesh {
        let mut mesh = grid(n);
        let seams: Vec<EdgeId> = mesh
            .edge_ids()
            .filter(|&e| {
                let [a, b] = mesh.edge(e).verts;
                mesh.position(a).x == at && mesh.position(b).x == at
            })
            .collect();
        for e in seams {
            mesh.edge_mut(e).seam = true;
        }
        mesh
    }

    fn find_all() -> IslandOptions {
        IslandOptions::default().with_find_all(true).with_sync(true)
    }

    #[test]
    fn test_two_objects_and_grouping() {
        let mut scene: Scene = Scene::new();
        let a = scene.add_object("a", seamed_grid(4, 1.0));
        let b = scene.add_object("b", split_quad());
        let mut host = NativeHost::new();

        let manager = IslandManager::from_scene(&mut scene, &mut host, find_all()).unwrap();
        assert_eq!(manager.len(), 3);
        assert_eq!(manager.islands_of(a).count(), 2);
        assert_eq!(manager.islands_of(b).count(), 1);
        let ids: BTreeSet<_> = manager.iter().map(|i| i.id()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_missing_layer_is_skipped() {
        let mut scene: Scene = Scene::new();
        let bare = crate::mesh::build_from_triangles(
            &[
                nalgebra::Point3::new(0.0, 0.0, 0.0),
                nalgebra::Point3::new(1.0, 0.0, 0.0),
                nalgebra::Point3::new(0.0, 1.0, 0.0),
            ],
            &[[0, 1, 2]],
        )
        .unwrap();
        let id = scene.add_object("bare", bare);
        let mut host = NativeHost::new();

        let manager = IslandManager::new(&mut scene, &mut host, &[id], find_all()).unwrap();
        assert!(manager.is_empty());
        assert_eq!(manager.objects().count(), 0);
    }

    #[test]
    fn test_unknown_object_is_an_error() {
        let mut scene: Scene = Scene::new();
        let mut host = NativeHost::new();
        let result = IslandManager::new(&mut scene, &mut host, &[ObjectId(7)], find_all());
        assert!(matches!(result, Err(UvError::UnknownObject(_))));
    }

    #[test]
    fn test_repeated_object_is_discovered_once() {
        let mut scene: Scene = Scene::new();
        let id = scene.add_object("quad", split_quad());
        scene.mesh_mut(id).unwrap().vertex_mut(VertexId::new(1)).select = true;
        let mut host = NativeHost::new();

        let manager = IslandManager::new(&mut scene, &mut host, &[id, id], find_all()).unwrap();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.objects().count(), 1);

        let options = IslandOptions::default().with_sync(true).with_extend(true);
        let manager = IslandManager::new(&mut scene, &mut host, &[id, id], options).unwrap();
        assert_eq!(manager.len(), 1);
        manager.restore_vertex_selection(&mut scene).unwrap();
        let mesh = scene.mesh(id).unwrap();
        let selected: Vec<_> = mesh.vertex_ids().filter(|&v| mesh.vertex(v).select).collect();
        assert_eq!(selected, vec![VertexId::new(1)]);
    }

    #[test]
    fn test_failure_keeps_original_error_and_restores() {
        let mut scene: Scene = Scene::new();
        let id = scene.add_object("quad", split_quad());
        scene.mesh_mut(id).unwrap().vertex_mut(VertexId::new(1)).select = true;
        let mut host = NativeHost::new();

        let options = IslandOptions::default().with_sync(true).with_extend(true);
        let result = IslandManager::new(&mut scene, &mut host, &[id, ObjectId(9)], options);
        assert!(matches!(result, Err(UvError::UnknownObject(ObjectId(9)))));

        let mesh = scene.mesh(id).unwrap();
        let selected: Vec<_> = mesh.vertex_ids().filter(|&v| mesh.vertex(v).select).collect();
        assert_eq!(selected, vec![VertexId::new(1)]);
        assert!(mesh.face_ids().all(|f| !mesh.face(f).select));
    }

    #[test]
    fn test_sort_and_remove() {
        let mut scene: Scene = Scene::new();
        scene.add_object("a", seamed_grid(4, 1.0));
        let mut host = NativeHost::new();
        let mut manager = IslandManager::from_scene(&mut scene, &mut host, find_all()).unwrap();

        manager.sort_all_islands(|i| i.width(), true);
        assert_eq!(manager.islands()[0].width(), 3.0);
        manager.sort_all_islands(|i| i.width(), false);
        assert_eq!(manager.islands()[0].width(), 1.0);

        let narrow = manager.islands()[0].id();
        assert!(manager.remove_island(narrow).is_some());
        assert!(manager.remove_island(narrow).is_none());
        assert_eq!(manager.len(), 1);
        assert!(manager.get(narrow).is_none());
    }

    #[test]
    fn test_axes() {
        let mut scene: Scene = Scene::new();
        let m = Matrix4::new_translation(&Vector3::new(0.0, 0.0, 5.0));
        scene.add_object_with_matrix("a", seamed_grid(4, 2.0), m);
        let mut host = NativeHost::new();
        let manager = IslandManager::from_scene(&mut scene, &mut host, find_all()).unwrap();

        assert_eq!(manager.get_axis_uv(), UvAxis::U);
        assert_eq!(manager.get_axis_3d(&scene, Orientation::World).unwrap(), Axis3::X);
    }

    #[test]
    fn test_flush_once_per_object() {
        let mut scene: Scene = Scene::new();
        let a = scene.add_object("a", seamed_grid(4, 2.0));
        let b = scene.add_object("b", split_quad());
        let mut host = NativeHost::new();
        let mut manager = IslandManager::from_scene(&mut scene, &mut host, find_all()).unwrap();
        assert_eq!(manager.islands_of(a).count(), 2);

        manager.move_all(&mut scene, Vector2::new(1.0, 0.0)).unwrap();
        manager.update_uvmeshes(&scene, &mut host).unwrap();
        assert_eq!(host.flush_count(a), 1);
        assert_eq!(host.flush_count(b), 1);
        assert_eq!(manager.bounds().min, Point2::new(1.0, 0.0));
    }

    #[test]
    fn test_extend_under_sync_restores_vertex_selection() {
        let mut scene: Scene = Scene::new();
        let id = scene.add_object("quad", split_quad());
        scene.mesh_mut(id).unwrap().vertex_mut(VertexId::new(1)).select = true;
        let mut host = NativeHost::new();

        let options = IslandOptions::default().with_sync(true).with_extend(true);
        let manager = IslandManager::new(&mut scene, &mut host, &[id], options).unwrap();
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.islands()[0].num_faces(), 2);

        // Discovery leaves the grown selection in place until asked
        let mesh = scene.mesh(id).unwrap();
        assert!(mesh.vertex(VertexId::new(3)).select);

        manager.restore_vertex_selection(&mut scene).unwrap();
        let mesh = scene.mesh(id).unwrap();
        let selected: Vec<_> = mesh.vertex_ids().filter(|&v| mesh.vertex(v).select).collect();
        assert_eq!(selected, vec![VertexId::new(1)]);
        assert!(mesh.face_ids().all(|f| !mesh.face(f).select));
    }

    #[test]
    fn test_selection_checkpoint_all() {
        let mut scene: Scene = Scene::new();
        let id = scene.add_object("a", seamed_grid(2, 1.0));
        let mut host = NativeHost::new();
        let mut manager = IslandManager::from_scene(&mut scene, &mut host, find_all()).unwrap();

        manager.store_selection(&scene).unwrap();
        manager.select_all_uv(&mut scene).unwrap();
        let layer = scene.uv_layer(id).unwrap();
        assert!(scene.mesh(id).unwrap().uv_layer(layer).as_slice().iter().all(|l| l.select));

        manager.restore_selection(&mut scene).unwrap();
        assert!(scene.mesh(id).unwrap().uv_layer(layer).as_slice().iter().all(|l| !l.select));

        manager.select_all_uv(&mut scene).unwrap();
        manager.deselect_all_uv(&mut scene).unwrap();
        assert!(scene.mesh(id).unwrap().uv_layer(layer).as_slice().iter().all(|l| !l.select));
    }

    #[test]
    fn test_retain() {
        let mut scene: Scene = Scene::new();
        scene.add_object("a", seamed_grid(4, 1.0));
        let mut host = NativeHost::new();
        let mut manager = IslandManager::from_scene(&mut scene, &mut host, find_all()).unwrap();
        manager.retain(|i| i.num_faces() > 4);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.islands()[0].num_faces(), 12);
    }
}
