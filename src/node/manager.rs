//! Node groups of several objects.

use std::collections::BTreeSet;

use log::debug;

use super::{build_node_groups, NodeOptions, UvNodeGroup};
use crate::error::Result;
use crate::geometry::{cmp_sort_keys, UvBounds};
use crate::host::EditorHost;
use crate::island::{Island, IslandManager};
use crate::mesh::MeshIndex;
use crate::scene::{ObjectId, Scene};

/// All node groups built for one operator call.
#[derive(Debug, Clone)]
pub struct UvNodeManager<I: MeshIndex = u32> {
    groups: Vec<UvNodeGroup<I>>,
    options: NodeOptions,
}

impl<I: MeshIndex> UvNodeManager<I> {
    /// Build groups on every listed object. Objects without an active UV
    /// layer are skipped, as are repeated ids.
    pub fn new(scene: &Scene<I>, objects: &[ObjectId], options: NodeOptions) -> Result<Self> {
        let mut manager = Self::empty(options);
        let mut seen = BTreeSet::new();
        for &object in objects {
            if !seen.insert(object) {
                continue;
            }
            let mesh = scene.mesh(object)?;
            let Some(layer) = mesh.active_uv_layer() else {
                debug!("skipping {:?}: no uv layer", object);
                continue;
            };
            let groups = build_node_groups(mesh, layer, object, &options, None, manager.next_id());
            manager.groups.extend(groups);
        }
        Ok(manager)
    }

    /// Build groups restricted to the faces of one island.
    pub fn from_island(scene: &Scene<I>, island: &Island<I>, options: NodeOptions) -> Result<Self> {
        let mut manager = Self::empty(options);
        manager.add_island(scene, island)?;
        Ok(manager)
    }

    /// Build groups island by island, reusing the objects and layers the
    /// island manager already resolved. A group never spans two islands.
    pub fn from_islands(
        scene: &Scene<I>,
        islands: &IslandManager<I>,
        options: NodeOptions,
    ) -> Result<Self> {
        let mut manager = Self::empty(options);
        for island in islands {
            manager.add_island(scene, island)?;
        }
        Ok(manager)
    }

    fn empty(options: NodeOptions) -> Self {
        Self {
            groups: Vec::new(),
            options,
        }
    }

    fn next_id(&self) -> usize {
        self.groups.iter().map(|g| g.id() + 1).max().unwrap_or(0)
    }

    fn add_island(&mut self, scene: &Scene<I>, island: &Island<I>) -> Result<()> {
        let mesh = scene.mesh(island.object())?;
        let groups = build_node_groups(
            mesh,
            island.layer(),
            island.object(),
            &self.options,
            Some(island.faces()),
            self.next_id(),
        );
        self.groups.extend(groups);
        Ok(())
    }

    /// Options the groups were built with.
    #[inline]
    pub fn options(&self) -> &NodeOptions {
        &self.options
    }

    /// Number of groups.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no group was built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All groups, in the current order.
    #[inline]
    pub fn groups(&self) -> &[UvNodeGroup<I>] {
        &self.groups
    }

    /// Iterate over groups.
    pub fn iter(&self) -> impl Iterator<Item = &UvNodeGroup<I>> {
        self.groups.iter()
    }

    /// Iterate mutably over groups.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut UvNodeGroup<I>> {
        self.groups.iter_mut()
    }

    /// Groups of one object.
    pub fn groups_of(&self, object: ObjectId) -> impl Iterator<Item = &UvNodeGroup<I>> {
        self.groups.iter().filter(move |g| g.object() == object)
    }

    /// Total number of nodes over all groups.
    pub fn node_count(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }

    /// Sort groups by a key. Stable; NaN keys sort last.
    pub fn sort_groups<F>(&mut self, mut key: F, reverse: bool)
    where
        F: FnMut(&UvNodeGroup<I>) -> f64,
    {
        let mut keyed: Vec<(f64, UvNodeGroup<I>)> =
            self.groups.drain(..).map(|g| (key(&g), g)).collect();
        keyed.sort_by(|a, b| cmp_sort_keys(a.0, b.0, reverse));
        self.groups = keyed.into_iter().map(|(_, g)| g).collect();
    }

    /// Remove a group, returning it.
    pub fn remove_group(&mut self, id: usize) -> Option<UvNodeGroup<I>> {
        let pos = self.groups.iter().position(|g| g.id() == id)?;
        Some(self.groups.remove(pos))
    }

    /// Keep only the groups for which `f` returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&UvNodeGroup<I>) -> bool,
    {
        self.groups.retain(f);
    }

    /// Union of all group bounds, or the zero box when empty.
    pub fn bounds(&self) -> UvBounds {
        let mut iter = self.groups.iter();
        let Some(first) = iter.next() else {
            return UvBounds::default();
        };
        iter.fold(*first.bounds(), |acc, g| acc.union(g.bounds()))
    }

    /// Write every group's node positions back to its loops.
    pub fn update_uvs(&self, scene: &mut Scene<I>) -> Result<()> {
        for group in &self.groups {
            group.update_uvs(scene.mesh_mut(group.object())?);
        }
        Ok(())
    }

    /// Commit every object that has groups, once per object.
    ///
    /// Node edits must already be written with [`UvNodeManager::update_uvs`]
    /// or [`UvNodeGroup::update_uvs`].
    pub fn update_uvmeshes<H>(&self, scene: &Scene<I>, host: &mut H) -> Result<()>
    where
        H: EditorHost<I> + ?Sized,
    {
        let touched: BTreeSet<ObjectId> = self.groups.iter().map(|g| g.object()).collect();
        for object in touched {
            host.update_mesh(object, scene.mesh(object)?)?;
        }
        Ok(())
    }
}

impl<'a, I: MeshIndex> IntoIterator for &'a UvNodeManager<I> {
    type Item = &'a UvNodeGroup<I>;
    type IntoIter = std::slice::Iter<'a, UvNodeGroup<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{grid, split_quad, split_quad_with_uv_cut};
    use crate::host::NativeHost;
    use crate::island::IslandOptions;
    use nalgebra::Point2;

    #[test]
    fn test_groups_over_objects() {
        let mut scene: Scene = Scene::new();
        let a = scene.add_object("a", split_quad_with_uv_cut());
        let b = scene.add_object("b", grid(2));
        let ids: Vec<_> = scene.object_ids().collect();

        let manager = UvNodeManager::new(&scene, &ids, NodeOptions::default().all_loops()).unwrap();
        assert_eq!(manager.groups_of(a).count(), 2);
        assert_eq!(manager.groups_of(b).count(), 1);
        assert_eq!(manager.node_count(), 6 + 9);
        let unique: BTreeSet<_> = manager.iter().map(|g| g.id()).collect();
        assert_eq!(unique.len(), 3);

        let twice = UvNodeManager::new(&scene, &[a, a], NodeOptions::default().all_loops()).unwrap();
        assert_eq!(twice.len(), 2);
        assert_eq!(twice.node_count(), 6);
    }

    #[test]
    fn test_from_islands_splits_at_seams() {
        let mut scene: Scene = Scene::new();
        let id = scene.add_object("quad", split_quad());
        {
            let mesh = scene.mesh_mut(id).unwrap();
            let d = mesh.edge_ids().find(|&e| !mesh.is_boundary_edge(e)).unwrap();
            mesh.edge_mut(d).seam = true;
        }
        let mut host = NativeHost::new();
        let options = IslandOptions::default().with_find_all(true).with_sync(true);
        let islands = IslandManager::from_scene(&mut scene, &mut host, options).unwrap();
        assert_eq!(islands.len(), 2);

        // UVs are shared across the seam, but each island gets its own nodes
        let nodes = UvNodeManager::from_islands(&scene, &islands, NodeOptions::default().all_loops())
            .unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes.node_count(), 6);

        let first = &islands.islands()[0];
        let single = UvNodeManager::from_island(&scene, first, NodeOptions::default().all_loops())
            .unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.node_count(), 3);
        assert!(single.iter().all(|g| g.object() == id));
    }

    #[test]
    fn test_update_and_flush_once() {
        let mut scene: Scene = Scene::new();
        let id = scene.add_object("cut", split_quad_with_uv_cut());
        let mut manager =
            UvNodeManager::new(&scene, &[id], NodeOptions::default().all_loops()).unwrap();

        for group in manager.iter_mut() {
            for node in group.nodes_mut() {
                node.uv = Point2::new(node.uv.x * 0.5, node.uv.y);
            }
            group.update_bounds();
        }
        manager.update_uvs(&mut scene).unwrap();
        let mut host = NativeHost::new();
        manager.update_uvmeshes(&scene, &mut host).unwrap();

        assert_eq!(host.flush_count(id), 1);
        assert_eq!(manager.bounds().max, Point2::new(1.5, 1.0));
        let layer = scene.uv_layer(id).unwrap();
        let mesh = scene.mesh(id).unwrap();
        assert!(mesh.loop_ids().all(|l| mesh.uv(layer, l).x <= 1.5));
    }

    #[test]
    fn test_sort_and_remove() {
        let mut scene: Scene = Scene::new();
        let id = scene.add_object("cut", split_quad_with_uv_cut());
        let mut manager =
            UvNodeManager::new(&scene, &[id], NodeOptions::default().all_loops()).unwrap();

        manager.sort_groups(|g| g.center().x, true);
        assert!(manager.groups()[0].center().x > manager.groups()[1].center().x);
        let first = manager.groups()[0].id();
        assert!(manager.remove_group(first).is_some());
        assert_eq!(manager.len(), 1);
        manager.retain(|_| false);
        assert!(manager.is_empty());
        assert_eq!(manager.bounds(), UvBounds::default());
    }
}
