//! The UV node.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use nalgebra::Point2;

use crate::geometry::uv_key;
use crate::mesh::{LoopId, MeshIndex, UvLayerId, UvMesh, VertexId};

/// Identity of a node: rounded UV position and owning vertex.
pub type NodeKey<I = u32> = ((i64, i64), VertexId<I>);

/// Loops of one vertex that share a UV position.
///
/// Two loops at the same UV but on different vertices are different nodes,
/// and so are two loops of one vertex on either side of a UV seam.
///
/// Equality, hashing and ordering use [`UvNode::key`], which is computed
/// from the current `uv`. Editing `uv` changes the key, so nodes must not be
/// edited while they sit in a hashed or sorted container.
#[derive(Debug, Clone)]
pub struct UvNode<I: MeshIndex = u32> {
    /// Working UV position. Written to every loop by
    /// [`UvNodeGroup::update_uvs`](super::UvNodeGroup::update_uvs).
    pub uv: Point2<f64>,
    vert: VertexId<I>,
    pub(crate) loops: Vec<LoopId<I>>,
    pub(crate) neighbors: Vec<usize>,
}

impl<I: MeshIndex> UvNode<I> {
    pub(crate) fn new(uv: Point2<f64>, vert: VertexId<I>) -> Self {
        Self {
            uv,
            vert,
            loops: Vec::new(),
            neighbors: Vec::new(),
        }
    }

    /// Dedup key of the current position.
    #[inline]
    pub fn key(&self) -> NodeKey<I> {
        (uv_key(&self.uv), self.vert)
    }

    /// Owning vertex.
    #[inline]
    pub fn vert(&self) -> VertexId<I> {
        self.vert
    }

    /// Loops written together with this node.
    #[inline]
    pub fn loops(&self) -> &[LoopId<I>] {
        &self.loops
    }

    /// Indices of adjacent nodes within the same group.
    #[inline]
    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// Number of adjacent nodes.
    #[inline]
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Whether any of the node's loops is pinned.
    pub fn is_pinned(&self, mesh: &UvMesh<I>, layer: UvLayerId) -> bool {
        self.loops.iter().any(|&l| mesh.luv(layer, l).pin)
    }

    pub(crate) fn connect(&mut self, other: usize) {
        if !self.neighbors.contains(&other) {
            self.neighbors.push(other);
        }
    }
}

impl<I: MeshIndex> PartialEq for UvNode<I> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<I: MeshIndex> Eq for UvNode<I> {}

impl<I: MeshIndex> Hash for UvNode<I> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl<I: MeshIndex> PartialOrd for UvNode<I> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I: MeshIndex> Ord for UvNode<I> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rounding_merges_close_uvs() {
        let v = VertexId::<u32>::new(3);
        let a = UvNode::new(Point2::new(0.25, 0.5), v);
        let b = UvNode::new(Point2::new(0.25 + 2e-7, 0.5 - 2e-7), v);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&b));
    }

    #[test]
    fn test_vertex_is_part_of_identity() {
        let a = UvNode::<u32>::new(Point2::new(0.5, 0.5), VertexId::new(1));
        let b = UvNode::<u32>::new(Point2::new(0.5, 0.5), VertexId::new(2));
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn test_order_is_uv_first() {
        let a = UvNode::<u32>::new(Point2::new(0.0, 1.0), VertexId::new(9));
        let b = UvNode::<u32>::new(Point2::new(1.0, 0.0), VertexId::new(0));
        let c = UvNode::<u32>::new(Point2::new(1.0, 0.5), VertexId::new(0));
        let mut nodes = [c.clone(), b.clone(), a.clone()];
        nodes.sort();
        assert_eq!(nodes, [a, b, c]);
    }

    #[test]
    fn test_connect_is_idempotent() {
        let mut a = UvNode::<u32>::new(Point2::origin(), VertexId::new(0));
        a.connect(4);
        a.connect(4);
        assert_eq!(a.neighbors(), &[4]);
        assert_eq!(a.degree(), 1);
    }
}
