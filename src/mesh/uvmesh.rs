//! Polygon mesh with per-loop UV storage.
//!
//! This is the editing-side mesh the UV tools operate on. It follows the
//! usual editor layout:
//!
//! - A **loop** is one corner of one face. Loops of a face form a ring
//!   through their `next`/`prev` links, and each loop owns the edge running
//!   from its vertex to the next loop's vertex.
//! - An **edge** is undirected and keeps the radial list of loops that use
//!   it. One loop means a mesh boundary, two an interior edge.
//! - UV coordinates live in [`UvLayer`]s, one [`LoopUv`] per loop, so the
//!   same vertex may carry a different UV in every face around it.
//!
//! Selection flags exist twice: the 3D flags on vertices, edges and faces,
//! and the 2D flags on every [`LoopUv`]. Which of the two is authoritative
//! depends on the editor's selection-sync setting; see [`crate::sync`].

use nalgebra::{Point2, Point3};

use super::index::{EdgeId, FaceId, LoopId, MeshIndex, UvLayerId, VertexId};
use crate::error::{Result, UvError};

/// A vertex of the mesh.
#[derive(Debug, Clone)]
pub struct Vertex<I: MeshIndex = u32> {
    /// Object-space position.
    pub position: Point3<f64>,

    /// 3D selection flag.
    pub select: bool,

    /// Every loop that sits on this vertex.
    pub(crate) loops: Vec<LoopId<I>>,
}

impl<I: MeshIndex> Vertex<I> {
    /// Create an unselected vertex at the given position.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            select: false,
            loops: Vec::new(),
        }
    }
}

/// A face corner.
#[derive(Debug, Clone, Copy)]
pub struct Loop<I: MeshIndex = u32> {
    /// The vertex at this corner.
    pub vert: VertexId<I>,

    /// The edge from `vert` to the next loop's vertex.
    pub edge: EdgeId<I>,

    /// The owning face.
    pub face: FaceId<I>,

    /// Next loop around the face.
    pub next: LoopId<I>,

    /// Previous loop around the face.
    pub prev: LoopId<I>,
}

/// An undirected edge.
#[derive(Debug, Clone)]
pub struct Edge<I: MeshIndex = u32> {
    /// The two endpoints, in the order the first using face visits them.
    pub verts: [VertexId<I>; 2],

    /// Seam flag. Seams bound island flood fills.
    pub seam: bool,

    /// 3D selection flag.
    pub select: bool,

    /// Radial list of loops using this edge.
    pub(crate) loops: Vec<LoopId<I>>,
}

/// A polygon face.
#[derive(Debug, Clone, Copy)]
pub struct Face<I: MeshIndex = u32> {
    /// First loop of the face ring.
    pub first: LoopId<I>,

    /// Number of corners.
    pub len: usize,

    /// 3D selection flag.
    pub select: bool,
}

/// Per-loop UV data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopUv {
    /// The UV coordinate.
    pub uv: Point2<f64>,

    /// UV vertex selection.
    pub select: bool,

    /// UV edge selection for the edge starting at this loop.
    pub select_edge: bool,

    /// Pinned loops are held in place by relaxing tools.
    pub pin: bool,
}

impl LoopUv {
    /// An unselected, unpinned coordinate.
    pub fn new(uv: Point2<f64>) -> Self {
        Self {
            uv,
            select: false,
            select_edge: false,
            pin: false,
        }
    }
}

/// A named UV map holding one [`LoopUv`] per mesh loop.
#[derive(Debug, Clone)]
pub struct UvLayer {
    /// Layer name.
    pub name: String,
    data: Vec<LoopUv>,
}

impl UvLayer {
    /// Number of stored loop coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw per-loop data.
    pub fn as_slice(&self) -> &[LoopUv] {
        &self.data
    }
}

/// A polygon mesh with loop-level UV layers and edit-mode flags.
#[derive(Debug, Clone)]
pub struct UvMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) loops: Vec<Loop<I>>,
    pub(crate) edges: Vec<Edge<I>>,
    pub(crate) faces: Vec<Face<I>>,
    pub(crate) uv_layers: Vec<UvLayer>,
    pub(crate) active_uv: Option<usize>,
}

impl<I: MeshIndex> Default for UvMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> UvMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            loops: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            uv_layers: Vec::new(),
            active_uv: None,
        }
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of loops (face corners).
    #[inline]
    pub fn num_loops(&self) -> usize {
        self.loops.len()
    }

    /// Get the number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get a mutable vertex by ID.
    #[inline]
    pub fn vertex_mut(&mut self, id: VertexId<I>) -> &mut Vertex<I> {
        &mut self.vertices[id.index()]
    }

    /// Get a loop by ID.
    #[inline]
    pub fn loop_at(&self, id: LoopId<I>) -> &Loop<I> {
        &self.loops[id.index()]
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        &self.edges[id.index()]
    }

    /// Get a mutable edge by ID.
    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId<I>) -> &mut Edge<I> {
        &mut self.edges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get a mutable face by ID.
    #[inline]
    pub fn face_mut(&mut self, id: FaceId<I>) -> &mut Face<I> {
        &mut self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    // ==================== Topology Queries ====================

    /// The vertex a loop sits on.
    #[inline]
    pub fn loop_vert(&self, l: LoopId<I>) -> VertexId<I> {
        self.loop_at(l).vert
    }

    /// The edge leaving a loop towards the next corner.
    #[inline]
    pub fn loop_edge(&self, l: LoopId<I>) -> EdgeId<I> {
        self.loop_at(l).edge
    }

    /// The face owning a loop.
    #[inline]
    pub fn loop_face(&self, l: LoopId<I>) -> FaceId<I> {
        self.loop_at(l).face
    }

    /// Next loop around the face.
    #[inline]
    pub fn loop_next(&self, l: LoopId<I>) -> LoopId<I> {
        self.loop_at(l).next
    }

    /// Previous loop around the face.
    #[inline]
    pub fn loop_prev(&self, l: LoopId<I>) -> LoopId<I> {
        self.loop_at(l).prev
    }

    /// Loops using an edge.
    #[inline]
    pub fn edge_loops(&self, e: EdgeId<I>) -> &[LoopId<I>] {
        &self.edge(e).loops
    }

    /// Faces linked to an edge.
    pub fn edge_faces(&self, e: EdgeId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.edge_loops(e).iter().map(move |&l| self.loop_face(l))
    }

    /// Check if an edge has fewer than two linked faces.
    #[inline]
    pub fn is_boundary_edge(&self, e: EdgeId<I>) -> bool {
        self.edge(e).loops.len() < 2
    }

    /// Loops sitting on a vertex.
    #[inline]
    pub fn vertex_loops(&self, v: VertexId<I>) -> &[LoopId<I>] {
        &self.vertex(v).loops
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all loop IDs.
    pub fn loop_ids(&self) -> impl Iterator<Item = LoopId<I>> + '_ {
        (0..self.loops.len()).map(LoopId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.edges.len()).map(EdgeId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over the loops of a face, in ring order.
    pub fn face_loops(&self, f: FaceId<I>) -> FaceLoopIter<'_, I> {
        FaceLoopIter::new(self, f)
    }

    /// Iterate over the vertices of a face.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_loops(f).map(|l| self.loop_vert(l))
    }

    /// Iterate over the edges of a face.
    pub fn face_edges(&self, f: FaceId<I>) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.face_loops(f).map(|l| self.loop_edge(l))
    }

    // ==================== UV Layers ====================

    /// Attach a UV layer from per-loop coordinates (indexed by loop ID).
    ///
    /// The first layer added becomes the active one.
    pub fn add_uv_layer(&mut self, name: &str, coords: Vec<Point2<f64>>) -> Result<UvLayerId> {
        if coords.len() != self.loops.len() {
            return Err(UvError::UvLayerSize {
                expected: self.loops.len(),
                found: coords.len(),
            });
        }

        let id = UvLayerId(self.uv_layers.len());
        self.uv_layers.push(UvLayer {
            name: name.to_string(),
            data: coords.into_iter().map(LoopUv::new).collect(),
        });
        if self.active_uv.is_none() {
            self.active_uv = Some(id.0);
        }
        Ok(id)
    }

    /// The active UV layer, if the mesh has any.
    #[inline]
    pub fn active_uv_layer(&self) -> Option<UvLayerId> {
        self.active_uv.map(UvLayerId)
    }

    /// Get a UV layer.
    #[inline]
    pub fn uv_layer(&self, layer: UvLayerId) -> &UvLayer {
        &self.uv_layers[layer.0]
    }

    /// UV data of one loop.
    #[inline]
    pub fn luv(&self, layer: UvLayerId, l: LoopId<I>) -> &LoopUv {
        &self.uv_layers[layer.0].data[l.index()]
    }

    /// Mutable UV data of one loop.
    #[inline]
    pub fn luv_mut(&mut self, layer: UvLayerId, l: LoopId<I>) -> &mut LoopUv {
        &mut self.uv_layers[layer.0].data[l.index()]
    }

    /// The UV coordinate of a loop.
    #[inline]
    pub fn uv(&self, layer: UvLayerId, l: LoopId<I>) -> Point2<f64> {
        self.luv(layer, l).uv
    }

    /// Set the UV coordinate of a loop.
    #[inline]
    pub fn set_uv(&mut self, layer: UvLayerId, l: LoopId<I>, uv: Point2<f64>) {
        self.luv_mut(layer, l).uv = uv;
    }

    // ==================== Validation ====================

    /// Check if the mesh is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        for (li, lp) in self.loops.iter().enumerate() {
            let id = LoopId::new(li);
            if self.loop_at(lp.next).prev != id || self.loop_at(lp.prev).next != id {
                return false;
            }
            if self.loop_face(lp.next) != lp.face {
                return false;
            }
            let edge = self.edge(lp.edge);
            let dest = self.loop_vert(lp.next);
            let matches = (edge.verts[0] == lp.vert && edge.verts[1] == dest)
                || (edge.verts[1] == lp.vert && edge.verts[0] == dest);
            if !matches || !edge.loops.contains(&id) {
                return false;
            }
            if !self.vertex(lp.vert).loops.contains(&id) {
                return false;
            }
        }

        for f in self.face_ids() {
            if self.face_loops(f).count() != self.face(f).len {
                return false;
            }
        }

        self.uv_layers.iter().all(|layer| layer.len() == self.loops.len())
    }
}

/// Iterator over the loops of a face.
pub struct FaceLoopIter<'a, I: MeshIndex = u32> {
    mesh: &'a UvMesh<I>,
    start: LoopId<I>,
    current: LoopId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> FaceLoopIter<'a, I> {
    fn new(mesh: &'a UvMesh<I>, f: FaceId<I>) -> Self {
        let start = mesh.face(f).first;
        Self {
            mesh,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceLoopIter<'a, I> {
    type Item = LoopId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.loop_next(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}
