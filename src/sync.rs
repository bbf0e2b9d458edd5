//! Projection between the 3D selection and the per-loop UV selection.
//!
//! With selection sync on, the editor keeps only the 3D selection and the UV
//! flags are meaningless. Algorithms written against UV flags call
//! [`sync_uv_from_mesh`] first, run, and then [`sync_mesh_from_uv`] to carry
//! the result back. Both are O(loops) and never touch topology.

use crate::error::Result;
use crate::host::EditorHost;
use crate::mesh::{LoopId, MeshIndex, UvLayerId, UvMesh};
use crate::scene::{ObjectId, Scene};

/// Rewrite the UV flags from the 3D selection.
///
/// A loop is UV-selected iff its vertex is selected, and UV-edge-selected
/// iff its edge is selected. Every flag is cleared first.
pub fn sync_uv_from_mesh<I: MeshIndex>(mesh: &mut UvMesh<I>, layer: UvLayerId) {
    for l in 0..mesh.num_loops() {
        let l = LoopId::<I>::new(l);
        let luv = mesh.luv_mut(layer, l);
        luv.select = false;
        luv.select_edge = false;
    }

    for l in 0..mesh.num_loops() {
        let l = LoopId::<I>::new(l);
        let vert_selected = mesh.vertex(mesh.loop_vert(l)).select;
        let edge_selected = mesh.edge(mesh.loop_edge(l)).select;
        let luv = mesh.luv_mut(layer, l);
        luv.select = vert_selected;
        luv.select_edge = edge_selected;
    }
}

/// Rewrite the 3D selection from the UV flags.
///
/// A vertex is selected iff any of its loops is UV-selected, a face iff all
/// of its loops are. Edge consistency is left to the host's flush.
pub fn sync_mesh_from_uv<I, H>(mesh: &mut UvMesh<I>, layer: UvLayerId, host: &mut H)
where
    I: MeshIndex,
    H: EditorHost<I> + ?Sized,
{
    for v in 0..mesh.num_vertices() {
        let v = crate::mesh::VertexId::<I>::new(v);
        let select = mesh
            .vertex_loops(v)
            .iter()
            .any(|&l| mesh.luv(layer, l).select);
        mesh.vertex_mut(v).select = select;
    }

    for f in 0..mesh.num_faces() {
        let f = crate::mesh::FaceId::<I>::new(f);
        let select = mesh.face_loops(f).all(|l| mesh.luv(layer, l).select);
        mesh.face_mut(f).select = select;
    }

    host.select_flush(mesh);
}

/// [`sync_uv_from_mesh`] over several objects. Objects without a UV layer
/// are skipped.
pub fn sync_uv_from_mesh_objects<I: MeshIndex>(
    scene: &mut Scene<I>,
    objects: &[ObjectId],
) -> Result<()> {
    for &id in objects {
        let mesh = scene.mesh_mut(id)?;
        if let Some(layer) = mesh.active_uv_layer() {
            sync_uv_from_mesh(mesh, layer);
        }
    }
    Ok(())
}

/// [`sync_mesh_from_uv`] over several objects. Objects without a UV layer
/// are skipped.
pub fn sync_mesh_from_uv_objects<I, H>(
    scene: &mut Scene<I>,
    host: &mut H,
    objects: &[ObjectId],
) -> Result<()>
where
    I: MeshIndex,
    H: EditorHost<I> + ?Sized,
{
    for &id in objects {
        let mesh = scene.mesh_mut(id)?;
        if let Some(layer) = mesh.active_uv_layer() {
            sync_mesh_from_uv(mesh, layer, host);
        }
    }
    Ok(())
}

/// Effective UV vertex selection of a loop.
///
/// Under sync the owning vertex's 3D flag stands in for the UV flag.
#[inline]
pub fn is_uv_selected<I: MeshIndex>(
    mesh: &UvMesh<I>,
    layer: UvLayerId,
    l: LoopId<I>,
    sync: bool,
) -> bool {
    if sync {
        mesh.vertex(mesh.loop_vert(l)).select
    } else {
        mesh.luv(layer, l).select
    }
}

/// Effective UV edge selection of the edge starting at a loop.
#[inline]
pub fn is_uv_edge_selected<I: MeshIndex>(
    mesh: &UvMesh<I>,
    layer: UvLayerId,
    l: LoopId<I>,
    sync: bool,
) -> bool {
    if sync {
        mesh.edge(mesh.loop_edge(l)).select
    } else {
        mesh.luv(layer, l).select_edge
    }
}
