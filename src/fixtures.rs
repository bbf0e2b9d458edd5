//! Small meshes shared by unit tests.

use nalgebra::{Point2, Point3, Vector2};

use crate::mesh::{build_with_uvs, UvMesh};

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

/// The split quad with the second triangle's UVs shifted by (2, 0).
pub fn split_quad_with_uv_cut() -> UvMesh {
    let faces = vec![[0, 1, 2], [0, 2, 3]];
    let shift = Vector2::new(2.0, 0.0);
    let uvs = vec![
        [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
        [
            Point2::new(0.0, 0.0) + shift,
            Point2::new(1.0, 1.0) + shift,
            Point2::new(0.0, 1.0) + shift,
        ],
    ];
    build_with_uvs(&quad_vertices(), &faces, &uvs).unwrap()
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

/// A row of `n` unit quads along X with UVs equal to XY.
pub fn strip(n: usize) -> UvMesh {
    let mut vertices = Vec::with_capacity(2 * (n + 1));
    for j in 0..2 {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    let faces: Vec<[usize; 4]> = (0..n).map(|i| [i, i + 1, i + n + 2, i + n + 1]).collect();
    let uvs: Vec<[Point2<f64>; 4]> = faces
        .iter()
        .map(|face| face.map(|v| Point2::new(vertices[v].x, vertices[v].y)))
        .collect();
    build_with_uvs(&vertices, &faces, &uvs).unwrap()
}
