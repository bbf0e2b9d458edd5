//! Meshes, flag captures and hosts shared by the integration tests.

#![allow(dead_code)]

use nalgebra::{Point2, Point3};
use uvkit::error::{Result, UvError};
use uvkit::prelude::*;

fn quad_vertices() -> Vec<Point3<f64>> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ]
}

/// Unit quad split along the 0-2 diagonal, UVs equal to XY.
pub fn split_quad() -> UvMesh {
    let faces = vec![[0, 1, 2], [0, 2, 3]];
    let uvs = vec![
        [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
        [Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(0.0, 1.0)],
    ];
    build_with_uvs(&quad_vertices(), &faces, &uvs).unwrap()
}

/// The edge shared by the two triangles of [`split_quad`].
pub fn diagonal(mesh: &UvMesh) -> EdgeId {
    mesh.edge_ids()
        .find(|&e| !mesh.is_boundary_edge(e))
        .unwrap()
}

/// An `n` x `n` grid of unit quads with UVs equal to XY.
pub fn grid(n: usize) -> UvMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    let mut faces = Vec::with_capacity(n * n);
    let mut uvs = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let face = [v00, v00 + 1, v00 + n + 2, v00 + n + 1];
            uvs.push(face.map(|v| {
                let p = vertices[v];
                Point2::new(p.x, p.y)
            }));
            faces.push(face);
        }
    }

    build_with_uvs(&vertices, &faces, &uvs).unwrap()
}

/// Select every loop in UV and every face, edge and vertex in 3D.
pub fn select_everything(mesh: &mut UvMesh) {
    let layer = mesh.active_uv_layer().unwrap();
    for l in mesh.loop_ids().collect::<Vec<_>>() {
        let luv = mesh.luv_mut(layer, l);
        luv.select = true;
        luv.select_edge = true;
    }
    for v in mesh.vertex_ids().collect::<Vec<_>>() {
        mesh.vertex_mut(v).select = true;
    }
    for e in mesh.edge_ids().collect::<Vec<_>>() {
        mesh.edge_mut(e).select = true;
    }
    for f in mesh.face_ids().collect::<Vec<_>>() {
        mesh.face_mut(f).select = true;
    }
}

/// Every flag discovery may touch, in a comparable form.
#[derive(Debug, Clone, PartialEq)]
pub struct EditFlags {
    pub seams: Vec<bool>,
    pub verts: Vec<bool>,
    pub edges: Vec<bool>,
    pub faces: Vec<bool>,
    pub loops: Vec<(bool, bool)>,
}

impl EditFlags {
    pub fn of(mesh: &UvMesh) -> Self {
        let layer = mesh.active_uv_layer().unwrap();
        Self {
            seams: mesh.edge_ids().map(|e| mesh.edge(e).seam).collect(),
            verts: mesh.vertex_ids().map(|v| mesh.vertex(v).select).collect(),
            edges: mesh.edge_ids().map(|e| mesh.edge(e).select).collect(),
            faces: mesh.face_ids().map(|f| mesh.face(f).select).collect(),
            loops: mesh
                .loop_ids()
                .map(|l| {
                    let luv = mesh.luv(layer, l);
                    (luv.select, luv.select_edge)
                })
                .collect(),
        }
    }
}

/// Which primitive a [`FailingHost`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    MarkSeams,
    SelectLinkedUv,
    SelectLinkedMesh,
}

/// A host that runs the native primitive, then reports failure anyway.
///
/// The mesh is left in whatever state the primitive produced, so callers
/// must restore it themselves.
#[derive(Debug)]
pub struct FailingHost {
    pub inner: NativeHost,
    pub failure: Failure,
    /// Calls of the broken primitive that still succeed.
    pub remaining: usize,
}

impl FailingHost {
    pub fn new(failure: Failure) -> Self {
        Self::after(failure, 0)
    }

    pub fn after(failure: Failure, remaining: usize) -> Self {
        Self {
            inner: NativeHost::new(),
            failure,
            remaining,
        }
    }

    fn check(&mut self, which: Failure, name: &'static str) -> Result<()> {
        if self.failure != which {
            return Ok(());
        }
        match self.remaining.checked_sub(1) {
            Some(left) => {
                self.remaining = left;
                Ok(())
            }
            None => Err(UvError::host(name, "unsupported mesh state")),
        }
    }
}

impl EditorHost for FailingHost {
    fn mark_seams_from_uv_islands(&mut self, mesh: &mut UvMesh, layer: UvLayerId) -> Result<()> {
        self.inner.mark_seams_from_uv_islands(mesh, layer)?;
        self.check(Failure::MarkSeams, "mark_seams_from_uv_islands")
    }

    fn select_linked_uv(&mut self, mesh: &mut UvMesh, layer: UvLayerId) -> Result<()> {
        self.inner.select_linked_uv(mesh, layer)?;
        self.check(Failure::SelectLinkedUv, "select_linked_uv")
    }

    fn select_linked_mesh(
        &mut self,
        mesh: &mut UvMesh,
        delimit_uv: Option<UvLayerId>,
    ) -> Result<()> {
        self.inner.select_linked_mesh(mesh, delimit_uv)?;
        self.check(Failure::SelectLinkedMesh, "select_linked_mesh")
    }

    fn select_flush(&mut self, mesh: &mut UvMesh) {
        self.inner.select_flush(mesh);
    }

    fn update_mesh(&mut self, object: ObjectId, mesh: &UvMesh) -> Result<()> {
        self.inner.update_mesh(object, mesh)
    }
}
