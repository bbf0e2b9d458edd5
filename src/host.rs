//! Editor primitives the UV tools call into.
//!
//! Seam derivation from UV continuity, linked selection and committing an
//! edited mesh belong to the host editor, not to this crate. [`EditorHost`]
//! names exactly the operations the island and node code needs, and
//! [`NativeHost`] implements them directly on [`UvMesh`].

use std::collections::BTreeSet;

use crate::error::Result;
use crate::geometry::uv_coincident;
use crate::mesh::{EdgeId, FaceId, MeshIndex, UvLayerId, UvMesh};
use crate::scene::ObjectId;

/// Host editor operations used by the UV tools.
pub trait EditorHost<I: MeshIndex = u32> {
    /// Mark a seam on every UV-discontinuous edge touching the UV selection.
    ///
    /// Existing seams are kept.
    fn mark_seams_from_uv_islands(&mut self, mesh: &mut UvMesh<I>, layer: UvLayerId)
        -> Result<()>;

    /// Grow the UV selection to whole UV-connected islands.
    ///
    /// Only faces selected in 3D take part: without selection sync the UV
    /// editor shows nothing else.
    fn select_linked_uv(&mut self, mesh: &mut UvMesh<I>, layer: UvLayerId) -> Result<()>;

    /// Grow the 3D selection to connected components, optionally stopping
    /// at UV discontinuities of the given layer.
    fn select_linked_mesh(
        &mut self,
        mesh: &mut UvMesh<I>,
        delimit_uv: Option<UvLayerId>,
    ) -> Result<()>;

    /// Make edge selection consistent with vertex selection.
    fn select_flush(&mut self, mesh: &mut UvMesh<I>);

    /// Commit in-memory loop edits of an object back to the editor.
    fn update_mesh(&mut self, object: ObjectId, mesh: &UvMesh<I>) -> Result<()>;
}

/// Whether the UVs on both sides of an edge agree at both endpoints.
///
/// Boundary edges are continuous by definition.
pub fn is_uv_continuous<I: MeshIndex>(mesh: &UvMesh<I>, layer: UvLayerId, e: EdgeId<I>) -> bool {
    let loops = mesh.edge_loops(e);
    let Some((&first, rest)) = loops.split_first() else {
        return true;
    };

    let a_vert = mesh.loop_vert(first);
    let a_start = mesh.uv(layer, first);
    let a_end = mesh.uv(layer, mesh.loop_next(first));

    rest.iter().all(|&other| {
        let start = mesh.uv(layer, other);
        let end = mesh.uv(layer, mesh.loop_next(other));
        if mesh.loop_vert(other) == a_vert {
            uv_coincident(&start, &a_start) && uv_coincident(&end, &a_end)
        } else {
            uv_coincident(&start, &a_end) && uv_coincident(&end, &a_start)
        }
    })
}

/// [`EditorHost`] implemented directly on the in-memory mesh.
///
/// Flushes are recorded instead of being sent anywhere, which lets callers
/// check how often each object was committed.
#[derive(Debug, Default)]
pub struct NativeHost {
    flushed: Vec<ObjectId>,
}

impl NativeHost {
    /// Create a host with an empty flush log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every object committed so far, in call order.
    pub fn flushed(&self) -> &[ObjectId] {
        &self.flushed
    }

    /// Number of commits for one object.
    pub fn flush_count(&self, object: ObjectId) -> usize {
        self.flushed.iter().filter(|&&o| o == object).count()
    }

    /// Flood faces from `seeds` across edges accepted by `crosses`, never
    /// entering a face rejected by `enters`.
    fn flood_faces<I, E, F>(
        mesh: &UvMesh<I>,
        seeds: Vec<FaceId<I>>,
        crosses: E,
        enters: F,
    ) -> BTreeSet<FaceId<I>>
    where
        I: MeshIndex,
        E: Fn(EdgeId<I>) -> bool,
        F: Fn(FaceId<I>) -> bool,
    {
        let mut reached: BTreeSet<FaceId<I>> = BTreeSet::new();
        let mut stack = seeds;

        while let Some(f) = stack.pop() {
            if !reached.insert(f) {
                continue;
            }
            for e in mesh.face_edges(f) {
                if !crosses(e) {
                    continue;
                }
                for g in mesh.edge_faces(e) {
                    if !reached.contains(&g) && enters(g) {
                        stack.push(g);
                    }
                }
            }
        }
        reached
    }
}

impl<I: MeshIndex> EditorHost<I> for NativeHost {
    fn mark_seams_from_uv_islands(
        &mut self,
        mesh: &mut UvMesh<I>,
        layer: UvLayerId,
    ) -> Result<()> {
        let to_mark: Vec<EdgeId<I>> = mesh
            .edge_ids()
            .filter(|&e| !mesh.edge(e).seam && !mesh.is_boundary_edge(e))
            .filter(|&e| {
                mesh.edge_loops(e).iter().any(|&l| {
                    mesh.luv(layer, l).select || mesh.luv(layer, mesh.loop_next(l)).select
                })
            })
            .filter(|&e| !is_uv_continuous(mesh, layer, e))
            .collect();

        log::trace!("marking {} seams from uv islands", to_mark.len());
        for e in to_mark {
            mesh.edge_mut(e).seam = true;
        }
        Ok(())
    }

    fn select_linked_uv(&mut self, mesh: &mut UvMesh<I>, layer: UvLayerId) -> Result<()> {
        let visible = |f: FaceId<I>| mesh.face(f).select;
        let seeds: Vec<FaceId<I>> = mesh
            .face_ids()
            .filter(|&f| visible(f) && mesh.face_loops(f).any(|l| mesh.luv(layer, l).select))
            .collect();

        let reached =
            Self::flood_faces(mesh, seeds, |e| is_uv_continuous(mesh, layer, e), visible);
        crate::selection::select_all_uv(mesh, layer, reached);
        Ok(())
    }

    fn select_linked_mesh(
        &mut self,
        mesh: &mut UvMesh<I>,
        delimit_uv: Option<UvLayerId>,
    ) -> Result<()> {
        let seeds: Vec<FaceId<I>> = mesh
            .face_ids()
            .filter(|&f| mesh.face_vertices(f).any(|v| mesh.vertex(v).select))
            .collect();

        let crosses = |e: EdgeId<I>| match delimit_uv {
            Some(layer) => is_uv_continuous(mesh, layer, e),
            None => true,
        };
        let reached = Self::flood_faces(mesh, seeds, crosses, |_| true);

        for f in reached {
            mesh.face_mut(f).select = true;
            let loops: Vec<_> = mesh.face_loops(f).collect();
            for l in loops {
                let (v, e) = (mesh.loop_vert(l), mesh.loop_edge(l));
                mesh.vertex_mut(v).select = true;
                mesh.edge_mut(e).select = true;
            }
        }
        Ok(())
    }

    fn select_flush(&mut self, mesh: &mut UvMesh<I>) {
        for e in 0..mesh.num_edges() {
            let e = EdgeId::<I>::new(e);
            let [a, b] = mesh.edge(e).verts;
            let select = mesh.vertex(a).select && mesh.vertex(b).select;
            mesh.edge_mut(e).select = select;
        }
    }

    fn update_mesh(&mut self, object: ObjectId, _mesh: &UvMesh<I>) -> Result<()> {
        log::debug!("flushing uv edits of {:?}", object);
        self.flushed.push(object);
        Ok(())
    }
}
