//! Laplacian relaxation of UV node groups.
//!
//! Each free node moves towards the centroid of its neighbours:
//! `uv' = uv + λ (c - uv)`. All new positions of an iteration are computed
//! from the previous one before any is applied.
//!
//! # Example
//!
//! ```
//! use uvkit::prelude::*;
//! use uvkit::algo::relax::{relax_nodes, RelaxOptions};
//! use nalgebra::{Point2, Point3};
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let uvs = vec![[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.5, 1.0)]];
//! let mut scene: Scene = Scene::new();
//! let id = scene.add_object("tri", build_with_uvs(&vertices, &[[0, 1, 2]], &uvs).unwrap());
//!
//! let mut nodes = UvNodeManager::new(&scene, &[id], NodeOptions::default().all_loops()).unwrap();
//! let options = RelaxOptions::default().with_iterations(5).with_lambda(0.3);
//! relax_nodes(&mut nodes, &mut scene, &options).unwrap();
//! ```

use std::collections::BTreeSet;

use nalgebra::{Point2, Vector2};

use crate::error::Result;
use crate::host::is_uv_continuous;
use crate::mesh::{EdgeId, FaceId, MeshIndex, UvLayerId, UvMesh};
use crate::node::{UvNodeGroup, UvNodeManager};
use crate::scene::Scene;

/// Options for UV relaxation.
#[derive(Debug, Clone)]
pub struct RelaxOptions {
    /// Number of iterations.
    pub iterations: usize,

    /// Step towards the neighbour centroid (0.0 to 1.0).
    pub lambda: f64,

    /// Keep nodes on the border of the group's UV patch fixed.
    pub preserve_boundary: bool,
}

impl Default for RelaxOptions {
    fn default() -> Self {
        Self {
            iterations: 1,
            lambda: 0.5,
            preserve_boundary: true,
        }
    }
}

impl RelaxOptions {
    /// Create options with the specified number of iterations.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Create options with the specified lambda value.
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda.clamp(0.0, 1.0);
        self
    }

    /// Let border nodes move too.
    pub fn allow_boundary_movement(mut self) -> Self {
        self.preserve_boundary = false;
        self
    }
}

/// Whether an edge borders the patch covered by `faces`.
fn is_patch_border<I: MeshIndex>(
    mesh: &UvMesh<I>,
    layer: UvLayerId,
    faces: &BTreeSet<FaceId<I>>,
    e: EdgeId<I>,
) -> bool {
    mesh.is_boundary_edge(e)
        || mesh.edge(e).seam
        || !is_uv_continuous(mesh, layer, e)
        || mesh.edge_faces(e).any(|f| !faces.contains(&f))
}

/// Nodes that must not move.
fn fixed_nodes<I: MeshIndex>(
    group: &UvNodeGroup<I>,
    mesh: &UvMesh<I>,
    preserve_boundary: bool,
) -> Vec<bool> {
    let layer = group.layer();
    let faces = group.faces(mesh);

    group
        .nodes()
        .iter()
        .map(|node| {
            if node.degree() < 2 || node.is_pinned(mesh, layer) {
                return true;
            }
            preserve_boundary
                && node.loops().iter().any(|&l| {
                    let before = mesh.loop_edge(mesh.loop_prev(l));
                    let after = mesh.loop_edge(l);
                    is_patch_border(mesh, layer, &faces, before)
                        || is_patch_border(mesh, layer, &faces, after)
                })
        })
        .collect()
}

/// Relax one group and write the result to its loops.
pub fn relax_group<I: MeshIndex>(
    group: &mut UvNodeGroup<I>,
    mesh: &mut UvMesh<I>,
    options: &RelaxOptions,
) {
    if options.iterations == 0 || options.lambda == 0.0 || group.len() < 3 {
        return;
    }

    let fixed = fixed_nodes(group, mesh, options.preserve_boundary);
    if fixed.iter().all(|&f| f) {
        return;
    }

    for _ in 0..options.iterations {
        let nodes = group.nodes();
        let new_positions: Vec<Point2<f64>> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                if fixed[i] {
                    return node.uv;
                }
                let sum = node
                    .neighbors()
                    .iter()
                    .fold(Vector2::zeros(), |acc, &n| acc + nodes[n].uv.coords);
                let centroid = Point2::from(sum / node.degree() as f64);
                node.uv + (centroid - node.uv) * options.lambda
            })
            .collect();

        for (node, uv) in group.nodes_mut().iter_mut().zip(new_positions) {
            node.uv = uv;
        }
    }

    group.update_uvs(mesh);
    group.update_bounds();
}

/// Relax every group of a manager.
pub fn relax_nodes<I: MeshIndex>(
    manager: &mut UvNodeManager<I>,
    scene: &mut Scene<I>,
    options: &RelaxOptions,
) -> Result<()> {
    for group in manager.iter_mut() {
        relax_group(group, scene.mesh_mut(group.object())?, options);
    }
    Ok(())
}
