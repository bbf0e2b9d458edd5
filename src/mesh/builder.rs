//! Mesh construction utilities.
//!
//! Meshes are built from face-vertex lists. Loops are allocated face by face
//! in corner order, so loop `k` of the whole mesh is corner `k` of the
//! flattened face list. UV layers are given in that same order.

use std::collections::{HashMap, HashSet};

use nalgebra::{Point2, Point3};

use super::index::{EdgeId, FaceId, LoopId, MeshIndex, VertexId};
use super::uvmesh::{Edge, Face, Loop, UvMesh, Vertex};
use crate::error::{Result, UvError};

/// Build a mesh from vertices and polygon faces of any size.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - Faces as vertex index lists, counter-clockwise
///
/// # Example
/// ```
/// use uvkit::mesh::{build_from_polygons, UvMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let mesh: UvMesh = build_from_polygons(&vertices, &[vec![0, 1, 2], vec![0, 2, 3]]).unwrap();
/// assert_eq!(mesh.num_faces(), 2);
/// assert_eq!(mesh.num_edges(), 5);
/// ```
pub fn build_from_polygons<I: MeshIndex, F: AsRef<[usize]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
) -> Result<UvMesh<I>> {
    if faces.is_empty() {
        return Err(UvError::EmptyMesh);
    }

    let mut directed: HashSet<(usize, usize)> = HashSet::new();
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        if face.len() < 3 {
            return Err(UvError::DegenerateFace { face: fi });
        }
        for (i, &vi) in face.iter().enumerate() {
            if vi >= vertices.len() {
                return Err(UvError::InvalidVertexIndex { face: fi, vertex: vi });
            }
            if face[i + 1..].contains(&vi) {
                return Err(UvError::DegenerateFace { face: fi });
            }
        }
        for i in 0..face.len() {
            let key = (face[i], face[(i + 1) % face.len()]);
            if !directed.insert(key) {
                return Err(UvError::NonManifoldEdge { v0: key.0, v1: key.1 });
            }
        }
    }

    let num_loops: usize = faces.iter().map(|f| f.as_ref().len()).sum();
    let mut mesh = UvMesh::<I>::new();
    mesh.vertices = vertices.iter().map(|&p| Vertex::new(p)).collect();
    mesh.loops.reserve(num_loops);
    mesh.faces.reserve(faces.len());

    // Undirected edge lookup keyed by sorted vertex pair
    let mut edge_map: HashMap<(usize, usize), EdgeId<I>> = HashMap::new();

    for face in faces {
        let face = face.as_ref();
        let n = face.len();
        let first = mesh.loops.len();
        let face_id = FaceId::<I>::new(mesh.faces.len());

        for i in 0..n {
            let v0 = face[i];
            let v1 = face[(i + 1) % n];
            let key = (v0.min(v1), v0.max(v1));
            let edge = *edge_map.entry(key).or_insert_with(|| {
                let id = EdgeId::new(mesh.edges.len());
                mesh.edges.push(Edge {
                    verts: [VertexId::new(v0), VertexId::new(v1)],
                    seam: false,
                    select: false,
                    loops: Vec::new(),
                });
                id
            });

            let loop_id = LoopId::<I>::new(first + i);
            mesh.loops.push(Loop {
                vert: VertexId::new(v0),
                edge,
                face: face_id,
                next: LoopId::new(first + (i + 1) % n),
                prev: LoopId::new(first + (i + n - 1) % n),
            });
            mesh.edges[edge.index()].loops.push(loop_id);
            mesh.vertices[v0].loops.push(loop_id);
        }

        mesh.faces.push(Face {
            first: LoopId::new(first),
            len: n,
            select: false,
        });
    }

    Ok(mesh)
}

/// Build a mesh from triangle faces.
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<UvMesh<I>> {
    build_from_polygons(vertices, faces)
}

/// Build a mesh and attach an active UV layer named `UVMap`.
///
/// `face_uvs[f][c]` is the UV of corner `c` of face `f`, so a vertex shared
/// by several faces may be given a different coordinate in each of them.
pub fn build_with_uvs<I: MeshIndex, F: AsRef<[usize]>, U: AsRef<[Point2<f64>]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
    face_uvs: &[U],
) -> Result<UvMesh<I>> {
    let mut mesh = build_from_polygons(vertices, faces)?;
    if face_uvs.len() != faces.len() {
        return Err(UvError::UvLayerSize {
            expected: faces.len(),
            found: face_uvs.len(),
        });
    }

    let mut coords = Vec::with_capacity(mesh.num_loops());
    for (face, uvs) in faces.iter().zip(face_uvs) {
        let (face, uvs) = (face.as_ref(), uvs.as_ref());
        if face.len() != uvs.len() {
            return Err(UvError::UvLayerSize {
                expected: face.len(),
                found: uvs.len(),
            });
        }
        coords.extend_from_slice(uvs);
    }

    mesh.add_uv_layer("UVMap", coords)?;
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_quad() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        // Unit quad split along the 0-2 diagonal
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [0, 2, 3]];
        (vertices, faces)
    }

    #[test]
    fn test_two_triangles() {
        let (vertices, faces) = split_quad();
        let mesh: UvMesh<u32> = build_from_triangles(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_loops(), 6);
        assert_eq!(mesh.num_edges(), 5);
        assert!(mesh.is_valid());

        let interior: Vec<_> = mesh.edge_ids().filter(|&e| !mesh.is_boundary_edge(e)).collect();
        assert_eq!(interior.len(), 1);
        let [a, b] = mesh.edge(interior[0]).verts;
        assert_eq!((a.index().min(b.index()), a.index().max(b.index())), (0, 2));
    }

    #[test]
    fn test_mixed_polygons() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.5, 0.0),
        ];
        let faces = vec![vec![0, 1, 2, 3], vec![1, 4, 2]];
        let mesh: UvMesh<u32> = build_from_polygons(&vertices, &faces).unwrap();
        assert_eq!(mesh.num_loops(), 7);
        assert_eq!(mesh.num_edges(), 6);
        assert!(mesh.is_valid());

        let out_faces: Vec<Vec<usize>> = mesh
            .face_ids()
            .map(|f| mesh.face_vertices(f).map(|v| v.index()).collect())
            .collect();
        assert_eq!(out_faces, faces);
    }

    #[test]
    fn test_invalid_vertex_index() {
        let vertices = vec![Point3::new(0.0, 0.0, 0.0)];
        let result: Result<UvMesh<u32>> = build_from_triangles(&vertices, &[[0, 1, 2]]);
        assert!(matches!(result, Err(UvError::InvalidVertexIndex { face: 0, vertex: 1 })));
    }

    #[test]
    fn test_degenerate_face() {
        let (vertices, _) = split_quad();
        let result: Result<UvMesh<u32>> = build_from_triangles(&vertices, &[[0, 0, 2]]);
        assert!(matches!(result, Err(UvError::DegenerateFace { face: 0 })));

        let result: Result<UvMesh<u32>> = build_from_polygons(&vertices, &[vec![0, 1]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flipped_duplicate_is_non_manifold() {
        let (vertices, _) = split_quad();
        let result: Result<UvMesh<u32>> = build_from_triangles(&vertices, &[[0, 1, 2], [0, 1, 3]]);
        assert!(matches!(result, Err(UvError::NonManifoldEdge { v0: 0, v1: 1 })));
    }

    #[test]
    fn test_build_with_uvs() {
        let (vertices, faces) = split_quad();
        let uvs = vec![
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(0.0, 1.0)],
        ];
        let mesh: UvMesh<u32> = build_with_uvs(&vertices, &faces, &uvs).unwrap();
        let layer = mesh.active_uv_layer().unwrap();
        assert_eq!(mesh.uv(layer, LoopId::new(5)), Point2::new(0.0, 1.0));

        let short = vec![uvs[0].clone()];
        let result: Result<UvMesh<u32>> = build_with_uvs(&vertices, &faces, &short);
        assert!(result.is_err());
    }
}
