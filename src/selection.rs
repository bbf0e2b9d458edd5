//! Selection and seam snapshots.
//!
//! Several tools edit the mesh as scratch space: they ask the host to grow a
//! selection or to turn UV island borders into seams, read the result, and
//! must then put everything back. The snapshots here are plain values
//! captured before the scratch edit and written back afterwards. Restoring touches
//! only the elements that were captured, and restoring twice is the same as
//! restoring once.

use std::collections::BTreeMap;

use crate::mesh::{FaceId, LoopId, MeshIndex, UvLayerId, UvMesh};

/// The two UV selection flags of one loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopSelect {
    /// UV vertex selection.
    pub select: bool,
    /// UV edge selection.
    pub select_edge: bool,
}

/// Saved UV selection flags for a set of loops, keyed by loop.
#[derive(Debug, Clone, PartialEq)]
pub struct UvSelectionSnapshot<I: MeshIndex = u32> {
    layer: UvLayerId,
    flags: BTreeMap<LoopId<I>, LoopSelect>,
}

impl<I: MeshIndex> UvSelectionSnapshot<I> {
    /// Record the flags of every loop of the given faces.
    pub fn capture<It>(mesh: &UvMesh<I>, layer: UvLayerId, faces: It) -> Self
    where
        It: IntoIterator<Item = FaceId<I>>,
    {
        Self::capture_loops(
            mesh,
            layer,
            faces.into_iter().flat_map(|f| mesh.face_loops(f)),
        )
    }

    /// Record the flags of the given loops.
    pub fn capture_loops<It>(mesh: &UvMesh<I>, layer: UvLayerId, loops: It) -> Self
    where
        It: IntoIterator<Item = LoopId<I>>,
    {
        let flags = loops
            .into_iter()
            .map(|l| {
                let luv = mesh.luv(layer, l);
                (
                    l,
                    LoopSelect {
                        select: luv.select,
                        select_edge: luv.select_edge,
                    },
                )
            })
            .collect();
        Self { layer, flags }
    }

    /// Record the flags of every loop in the mesh.
    pub fn capture_all(mesh: &UvMesh<I>, layer: UvLayerId) -> Self {
        Self::capture(mesh, layer, mesh.face_ids())
    }

    /// Write the recorded flags back verbatim.
    pub fn restore(&self, mesh: &mut UvMesh<I>) {
        for (&l, sel) in &self.flags {
            let luv = mesh.luv_mut(self.layer, l);
            luv.select = sel.select;
            luv.select_edge = sel.select_edge;
        }
    }

    /// Saved flags of one loop, if it was captured.
    pub fn get(&self, l: LoopId<I>) -> Option<LoopSelect> {
        self.flags.get(&l).copied()
    }

    /// Number of captured loops.
    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Number of captured loops whose UV vertex flag was set.
    pub fn selected_count(&self) -> usize {
        self.flags.values().filter(|s| s.select).count()
    }
}

/// Set both UV selection flags of every loop of the given faces.
pub fn set_uv_selection<I, It>(mesh: &mut UvMesh<I>, layer: UvLayerId, faces: It, state: bool)
where
    I: MeshIndex,
    It: IntoIterator<Item = FaceId<I>>,
{
    for f in faces {
        let loops: Vec<LoopId<I>> = mesh.face_loops(f).collect();
        for l in loops {
            let luv = mesh.luv_mut(layer, l);
            luv.select = state;
            luv.select_edge = state;
        }
    }
}

/// Select every loop of the given faces in UV space.
pub fn select_all_uv<I, It>(mesh: &mut UvMesh<I>, layer: UvLayerId, faces: It)
where
    I: MeshIndex,
    It: IntoIterator<Item = FaceId<I>>,
{
    set_uv_selection(mesh, layer, faces, true);
}

/// Deselect every loop of the given faces in UV space.
pub fn deselect_all_uv<I, It>(mesh: &mut UvMesh<I>, layer: UvLayerId, faces: It)
where
    I: MeshIndex,
    It: IntoIterator<Item = FaceId<I>>,
{
    set_uv_selection(mesh, layer, faces, false);
}

/// Saved 3D selection of vertices, edges and faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshSelectionSnapshot {
    verts: Vec<bool>,
    edges: Vec<bool>,
    faces: Vec<bool>,
}

impl MeshSelectionSnapshot {
    /// Record the whole 3D selection.
    pub fn capture<I: MeshIndex>(mesh: &UvMesh<I>) -> Self {
        Self {
            verts: mesh.vertices.iter().map(|v| v.select).collect(),
            edges: mesh.edges.iter().map(|e| e.select).collect(),
            faces: mesh.faces.iter().map(|f| f.select).collect(),
        }
    }

    /// Write the recorded selection back.
    pub fn restore<I: MeshIndex>(&self, mesh: &mut UvMesh<I>) {
        for (v, &s) in mesh.vertices.iter_mut().zip(&self.verts) {
            v.select = s;
        }
        for (e, &s) in mesh.edges.iter_mut().zip(&self.edges) {
            e.select = s;
        }
        for (f, &s) in mesh.faces.iter_mut().zip(&self.faces) {
            f.select = s;
        }
    }

    /// Number of selected vertices at capture time.
    pub fn selected_vertex_count(&self) -> usize {
        self.verts.iter().filter(|&&s| s).count()
    }
}

/// Saved seam flags of every edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeamSnapshot {
    seams: Vec<bool>,
}

impl SeamSnapshot {
    /// Record every seam flag.
    pub fn capture<I: MeshIndex>(mesh: &UvMesh<I>) -> Self {
        Self {
            seams: mesh.edges.iter().map(|e| e.seam).collect(),
        }
    }

    /// Write the recorded seams back.
    pub fn restore<I: MeshIndex>(&self, mesh: &mut UvMesh<I>) {
        for (e, &s) in mesh.edges.iter_mut().zip(&self.seams) {
            e.seam = s;
        }
    }
}

/// Everything a scratch edit may overwrite: seams, the 3D selection,
/// and the UV selection of one layer.
#[derive(Debug, Clone)]
pub struct EditStateSnapshot<I: MeshIndex = u32> {
    seams: SeamSnapshot,
    mesh_selection: MeshSelectionSnapshot,
    uv_selection: UvSelectionSnapshot<I>,
}

impl<I: MeshIndex> EditStateSnapshot<I> {
    /// Record seams and both selections.
    pub fn capture(mesh: &UvMesh<I>, layer: UvLayerId) -> Self {
        Self {
            seams: SeamSnapshot::capture(mesh),
            mesh_selection: MeshSelectionSnapshot::capture(mesh),
            uv_selection: UvSelectionSnapshot::capture_all(mesh, layer),
        }
    }

    /// Put seams and both selections back.
    pub fn restore(&self, mesh: &mut UvMesh<I>) {
        self.seams.restore(mesh);
        self.mesh_selection.restore(mesh);
        self.uv_selection.restore(mesh);
    }

    /// The 3D selection part.
    pub fn mesh_selection(&self) -> &MeshSelectionSnapshot {
        &self.mesh_selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build_with_uvs;
    use nalgebra::{Point2, Point3};

    fn two_triangles() -> UvMesh {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [0, 2, 3]];
        let uvs = vec![
            [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
            [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(0.0, 1.0)],
        ];
        build_with_uvs(&vertices, &faces, &uvs).unwrap()
    }

    #[test]
    fn test_restore_is_verbatim_and_idempotent() {
        let mut mesh = two_triangles();
        let layer = mesh.active_uv_layer().unwrap();
        mesh.luv_mut(layer, LoopId::new(1)).select = true;
        mesh.luv_mut(layer, LoopId::new(4)).select_edge = true;

        let snapshot = UvSelectionSnapshot::capture_all(&mesh, layer);
        assert_eq!(snapshot.len(), 6);
        assert_eq!(snapshot.selected_count(), 1);

        let faces: Vec<_> = mesh.face_ids().collect();
        select_all_uv(&mut mesh, layer, faces);
        assert!(mesh.uv_layer(layer).as_slice().iter().all(|l| l.select && l.select_edge));

        snapshot.restore(&mut mesh);
        let once: Vec<_> = mesh.uv_layer(layer).as_slice().to_vec();
        snapshot.restore(&mut mesh);
        assert_eq!(mesh.uv_layer(layer).as_slice(), &once[..]);
        assert!(mesh.luv(layer, LoopId::new(1)).select);
        assert!(mesh.luv(layer, LoopId::new(4)).select_edge);
        assert!(!mesh.luv(layer, LoopId::new(0)).select);
    }

    #[test]
    fn test_partial_capture_leaves_other_faces_alone() {
        let mut mesh = two_triangles();
        let layer = mesh.active_uv_layer().unwrap();
        let first = FaceId::new(0);
        let second = FaceId::new(1);

        let snapshot = UvSelectionSnapshot::capture(&mesh, layer, [first]);
        select_all_uv(&mut mesh, layer, [first, second]);
        snapshot.restore(&mut mesh);

        assert!(mesh.face_loops(first).all(|l| !mesh.luv(layer, l).select));
        assert!(mesh.face_loops(second).all(|l| mesh.luv(layer, l).select));
        assert!(snapshot.get(LoopId::new(0)).is_some());
        assert!(snapshot.get(LoopId::new(3)).is_none());
    }

    #[test]
    fn test_snapshot_keyed_by_loop() {
        let mut mesh = two_triangles();
        let layer = mesh.active_uv_layer().unwrap();
        mesh.luv_mut(layer, LoopId::new(2)).select = true;

        let loops = [LoopId::new(5), LoopId::new(2), LoopId::new(5)];
        let snapshot = UvSelectionSnapshot::capture_loops(&mesh, layer, loops);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.get(LoopId::new(2)),
            Some(LoopSelect { select: true, select_edge: false })
        );
        assert_eq!(snapshot.get(LoopId::new(5)), Some(LoopSelect::default()));
        assert_eq!(snapshot.selected_count(), 1);
    }

    #[test]
    fn test_edit_state_round_trip() {
        let mut mesh = two_triangles();
        let layer = mesh.active_uv_layer().unwrap();
        mesh.vertex_mut(crate::mesh::VertexId::new(2)).select = true;
        let state = EditStateSnapshot::capture(&mesh, layer);

        for e in mesh.edges.iter_mut() {
            e.seam = true;
            e.select = true;
        }
        let faces: Vec<_> = mesh.face_ids().collect();
        deselect_all_uv(&mut mesh, layer, faces);
        mesh.vertex_mut(crate::mesh::VertexId::new(2)).select = false;

        state.restore(&mut mesh);
        assert!(mesh.edges.iter().all(|e| !e.seam && !e.select));
        assert!(mesh.vertex(crate::mesh::VertexId::new(2)).select);
        assert_eq!(state.mesh_selection().selected_vertex_count(), 1);
    }
}
