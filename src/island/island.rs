//! The island entity.

use std::cell::OnceCell;
use std::collections::BTreeSet;

use nalgebra::{Point2, Point3, Vector2, Vector3};

use crate::geometry::{Orientation, UvBounds};
use crate::mesh::{EdgeId, FaceId, LoopId, MeshIndex, UvLayerId, UvMesh};
use crate::scene::{EditObject, ObjectId};
use crate::selection::{self, UvSelectionSnapshot};
use crate::sync::is_uv_selected;

/// A maximal set of faces of one object connected across non-seam edges.
///
/// The face set is fixed at construction. Only UV coordinates change
/// afterwards, and every method that moves UVs refreshes the bounds.
///
/// The 3D center is computed on first use and then cached for the life of
/// the island. It depends only on the face set, so moving UVs does not
/// invalidate it, and it does not follow later edits to vertex positions.
#[derive(Debug, Clone)]
pub struct Island<I: MeshIndex = u32> {
    id: usize,
    object: ObjectId,
    layer: UvLayerId,
    faces: BTreeSet<FaceId<I>>,
    boundary_edges: BTreeSet<EdgeId<I>>,
    bounds: UvBounds,
    original_bounds: UvBounds,
    selection: Option<UvSelectionSnapshot<I>>,
    center_3d: OnceCell<Point3<f64>>,
}

impl<I: MeshIndex> Island<I> {
    /// Create an island and measure its UV bounds.
    pub fn new(
        id: usize,
        object: ObjectId,
        layer: UvLayerId,
        faces: BTreeSet<FaceId<I>>,
        boundary_edges: BTreeSet<EdgeId<I>>,
        mesh: &UvMesh<I>,
    ) -> Self {
        let mut island = Self {
            id,
            object,
            layer,
            faces,
            boundary_edges,
            bounds: UvBounds::default(),
            original_bounds: UvBounds::default(),
            selection: None,
            center_3d: OnceCell::new(),
        };
        island.update_bounds(mesh);
        island.original_bounds = island.bounds;
        island
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

    /// UV layer the island was found on.
    #[inline]
    pub fn layer(&self) -> UvLayerId {
        self.layer
    }

    /// Member faces.
    #[inline]
    pub fn faces(&self) -> &BTreeSet<FaceId<I>> {
        &self.faces
    }

    /// Edges that stopped the flood fill: seams, mesh borders, and edges
    /// shared with faces outside the target set.
    #[inline]
    pub fn boundary_edges(&self) -> &BTreeSet<EdgeId<I>> {
        &self.boundary_edges
    }

    /// Number of member faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Check whether a face belongs to this island.
    #[inline]
    pub fn contains_face(&self, f: FaceId<I>) -> bool {
        self.faces.contains(&f)
    }

    /// Current UV bounds.
    #[inline]
    pub fn bounds(&self) -> &UvBounds {
        &self.bounds
    }

    /// Lower-left UV corner.
    #[inline]
    pub fn min_uv(&self) -> Point2<f64> {
        self.bounds.min
    }

    /// Upper-right UV corner.
    #[inline]
    pub fn max_uv(&self) -> Point2<f64> {
        self.bounds.max
    }

    /// Center of the UV bounds.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.bounds.center()
    }

    /// UV width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    /// UV height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Center at construction time.
    #[inline]
    pub fn original_center(&self) -> Point2<f64> {
        self.original_bounds.center()
    }

    /// Width at construction time.
    #[inline]
    pub fn original_width(&self) -> f64 {
        self.original_bounds.width()
    }

    /// Height at construction time.
    #[inline]
    pub fn original_height(&self) -> f64 {
        self.original_bounds.height()
    }

    /// Every loop of every member face.
    pub fn loops<'a>(&'a self, mesh: &'a UvMesh<I>) -> impl Iterator<Item = LoopId<I>> + 'a {
        self.faces.iter().flat_map(move |&f| mesh.face_loops(f))
    }

    /// Recompute bounds from the member loops' UVs.
    pub fn update_bounds(&mut self, mesh: &UvMesh<I>) {
        let layer = self.layer;
        self.bounds = UvBounds::from_points(self.loops(mesh).map(|l| mesh.uv(layer, l)));
    }

    /// Translate every member loop's UV, then refresh bounds.
    pub fn move_by(&mut self, mesh: &mut UvMesh<I>, offset: Vector2<f64>) {
        self.transform(mesh, |uv| uv + offset);
    }

    /// Map every member loop's UV through `f`, then refresh bounds.
    pub fn transform<F>(&mut self, mesh: &mut UvMesh<I>, f: F)
    where
        F: Fn(Point2<f64>) -> Point2<f64>,
    {
        let loops: Vec<LoopId<I>> = self.loops(mesh).collect();
        for l in loops {
            let uv = mesh.uv(self.layer, l);
            mesh.set_uv(self.layer, l, f(uv));
        }
        self.update_bounds(mesh);
    }

    /// Scale about a pivot, per axis.
    pub fn scale_about(&mut self, mesh: &mut UvMesh<I>, scale: Vector2<f64>, pivot: Point2<f64>) {
        self.transform(mesh, |uv| {
            let d = uv - pivot;
            pivot + Vector2::new(d.x * scale.x, d.y * scale.y)
        });
    }

    /// Remember the UV selection of every member loop.
    pub fn store_selection(&mut self, mesh: &UvMesh<I>) {
        self.selection = Some(UvSelectionSnapshot::capture(
            mesh,
            self.layer,
            self.faces.iter().copied(),
        ));
    }

    /// Put back the selection recorded by [`Island::store_selection`].
    ///
    /// Does nothing if no selection was stored.
    pub fn restore_selection(&self, mesh: &mut UvMesh<I>) {
        if let Some(snapshot) = &self.selection {
            snapshot.restore(mesh);
        }
    }

    /// Select every member loop in UV space.
    pub fn select_all_uv(&self, mesh: &mut UvMesh<I>) {
        selection::select_all_uv(mesh, self.layer, self.faces.iter().copied());
    }

    /// Deselect every member loop in UV space.
    pub fn deselect_all_uv(&self, mesh: &mut UvMesh<I>) {
        selection::deselect_all_uv(mesh, self.layer, self.faces.iter().copied());
    }

    /// Number of member loops that are UV-selected.
    pub fn selected_uv_count(&self, mesh: &UvMesh<I>, sync: bool) -> usize {
        self.loops(mesh)
            .filter(|&l| is_uv_selected(mesh, self.layer, l, sync))
            .count()
    }

    /// Average position of the island's vertices.
    ///
    /// See the type-level docs for the caching rules.
    pub fn center_3d(&self, object: &EditObject<I>, orientation: Orientation) -> Point3<f64> {
        let local = *self.center_3d.get_or_init(|| {
            let mesh = &object.mesh;
            let verts: BTreeSet<_> = self
                .faces
                .iter()
                .flat_map(|&f| mesh.face_vertices(f))
                .collect();
            if verts.is_empty() {
                return Point3::origin();
            }
            let sum = verts
                .iter()
                .fold(Vector3::zeros(), |acc, &v| acc + mesh.position(v).coords);
            Point3::from(sum / verts.len() as f64)
        });

        match orientation {
            Orientation::Local => local,
            Orientation::World => object.to_world(&local),
        }
    }
}
