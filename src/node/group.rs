//! Connected groups of UV nodes.

use std::collections::BTreeSet;

use nalgebra::{Point2, Vector2};

use super::UvNode;
use crate::geometry::{UvAxis, UvBounds};
use crate::mesh::{FaceId, LoopId, MeshIndex, UvLayerId, UvMesh};
use crate::scene::ObjectId;
use crate::selection::UvSelectionSnapshot;

/// A connected component of the node graph of one object.
///
/// Node positions are a working copy. Edit [`UvNode::uv`] freely, then call
/// [`UvNodeGroup::update_uvs`] to write every loop of every node.
#[derive(Debug, Clone)]
pub struct UvNodeGroup<I: MeshIndex = u32> {
    id: usize,
    object: ObjectId,
    layer: UvLayerId,
    nodes: Vec<UvNode<I>>,
    bounds: UvBounds,
    selection: Option<UvSelectionSnapshot<I>>,
}

impl<I: MeshIndex> UvNodeGroup<I> {
    pub(crate) fn new(id: usize, object: ObjectId, layer: UvLayerId, nodes: Vec<UvNode<I>>) -> Self {
        let mut group = Self {
            id,
            object,
            layer,
            nodes,
            bounds: UvBounds::default(),
            selection: None,
        };
        group.update_bounds();
        group
    }

    /// Identifier, unique within the owning manager.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Owning object.
    #[inline]
    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// UV layer the nodes were read from.
    #[inline]
    pub fn layer(&self) -> UvLayerId {
        self.layer
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The nodes. Neighbour indices point into this slice.
    #[inline]
    pub fn nodes(&self) -> &[UvNode<I>] {
        &self.nodes
    }

    /// Mutable access to the nodes, for editing positions.
    #[inline]
    pub fn nodes_mut(&mut self) -> &mut [UvNode<I>] {
        &mut self.nodes
    }

    /// Bounds as of the last [`UvNodeGroup::update_bounds`].
    #[inline]
    pub fn bounds(&self) -> &UvBounds {
        &self.bounds
    }

    /// Lower-left corner.
    #[inline]
    pub fn min_uv(&self) -> Point2<f64> {
        self.bounds.min
    }

    /// Upper-right corner.
    #[inline]
    pub fn max_uv(&self) -> Point2<f64> {
        self.bounds.max
    }

    /// Center of the bounds.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.bounds.center()
    }

    /// Width of the bounds.
    #[inline]
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    /// Height of the bounds.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Every loop of every node.
    pub fn loops(&self) -> impl Iterator<Item = LoopId<I>> + '_ {
        self.nodes.iter().flat_map(|n| n.loops.iter().copied())
    }

    /// Faces touched by the group's loops.
    pub fn faces(&self, mesh: &UvMesh<I>) -> BTreeSet<FaceId<I>> {
        self.loops().map(|l| mesh.loop_face(l)).collect()
    }

    /// Recompute bounds from node positions.
    pub fn update_bounds(&mut self) {
        self.bounds = UvBounds::from_points(self.nodes.iter().map(|n| n.uv));
    }

    /// Write every node's position to all of its loops.
    pub fn update_uvs(&self, mesh: &mut UvMesh<I>) {
        for node in &self.nodes {
            for &l in &node.loops {
                mesh.set_uv(self.layer, l, node.uv);
            }
        }
    }

    /// Translate every node, write the loops and refresh bounds.
    pub fn move_by(&mut self, mesh: &mut UvMesh<I>, offset: Vector2<f64>) {
        for node in &mut self.nodes {
            node.uv += offset;
        }
        self.update_uvs(mesh);
        self.update_bounds();
    }

    /// Indices of the first and last node along an axis.
    ///
    /// Ties on the axis fall back to the node order. `None` when empty.
    pub fn endpoints(&self, axis: UvAxis) -> Option<(usize, usize)> {
        let cmp = |a: &usize, b: &usize| {
            let (na, nb) = (&self.nodes[*a], &self.nodes[*b]);
            axis.of(&na.uv)
                .total_cmp(&axis.of(&nb.uv))
                .then_with(|| na.cmp(nb))
        };
        let first = (0..self.nodes.len()).min_by(cmp)?;
        let last = (0..self.nodes.len()).max_by(cmp)?;
        Some((first, last))
    }

    /// Remember the UV selection of every loop in the group.
    pub fn store_selection(&mut self, mesh: &UvMesh<I>) {
        self.selection = Some(UvSelectionSnapshot::capture_loops(mesh, self.layer, self.loops()));
    }

    /// Put back the selection recorded by [`UvNodeGroup::store_selection`].
    pub fn restore_selection(&self, mesh: &mut UvMesh<I>) {
        if let Some(snapshot) = &self.selection {
            snapshot.restore(mesh);
        }
    }

    /// Set both UV selection flags on every loop in the group.
    pub fn set_uv_selection(&self, mesh: &mut UvMesh<I>, state: bool) {
        for l in self.loops() {
            let luv = mesh.luv_mut(self.layer, l);
            luv.select = state;
            luv.select_edge = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{build_node_groups, NodeOptions};
    use super::*;
    use crate::fixtures::{grid, split_quad};

    fn whole(mesh: &UvMesh) -> UvNodeGroup {
        let layer = mesh.active_uv_layer().unwrap();
        let options = NodeOptions::default().all_loops();
        build_node_groups(mesh, layer, ObjectId(0), &options, None, 0)
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn test_update_uvs_writes_every_loop() {
        let mut mesh = split_quad();
        let layer = mesh.active_uv_layer().unwrap();
        let mut group = whole(&mesh);

        let i = group.nodes().iter().position(|n| n.loops().len() == 2).unwrap();
        group.nodes_mut()[i].uv = Point2::new(-1.0, -1.0);
        group.update_uvs(&mut mesh);

        for &l in group.nodes()[i].loops() {
            assert_eq!(mesh.uv(layer, l), Point2::new(-1.0, -1.0));
        }
        group.update_bounds();
        assert_eq!(group.min_uv(), Point2::new(-1.0, -1.0));
    }

    #[test]
    fn test_move_round_trip() {
        let mut mesh = grid(2);
        let layer = mesh.active_uv_layer().unwrap();
        let before = mesh.uv_layer(layer).as_slice().to_vec();
        let mut group = whole(&mesh);
        let center = group.center();

        group.move_by(&mut mesh, Vector2::new(0.3, 0.7));
        assert!((group.center() - (center + Vector2::new(0.3, 0.7))).norm() < 1e-12);
        group.move_by(&mut mesh, Vector2::new(-0.3, -0.7));

        for (a, b) in before.iter().zip(mesh.uv_layer(layer).as_slice()) {
            assert!((a.uv - b.uv).norm() < 1e-12);
        }
        assert!((group.center() - center).norm() < 1e-12);
    }

    #[test]
    fn test_endpoints() {
        let mesh = grid(2);
        let group = whole(&mesh);
        let (a, b) = group.endpoints(UvAxis::U).unwrap();
        assert_eq!(group.nodes()[a].uv, Point2::new(0.0, 0.0));
        assert_eq!(group.nodes()[b].uv, Point2::new(2.0, 2.0));
    }

    #[test]
    fn test_selection_checkpoint() {
        let mut mesh = split_quad();
        let layer = mesh.active_uv_layer().unwrap();
        let mut group = whole(&mesh);
        group.store_selection(&mesh);
        group.set_uv_selection(&mut mesh, true);
        assert!(mesh.uv_layer(layer).as_slice().iter().all(|l| l.select));
        group.restore_selection(&mut mesh);
        assert!(mesh.uv_layer(layer).as_slice().iter().all(|l| !l.select));
        assert_eq!(group.faces(&mesh).len(), 2);
    }
}
