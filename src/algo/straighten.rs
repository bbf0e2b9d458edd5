//! Straightening node chains.
//!
//! The end nodes of a group are the first and last node along the axis with
//! the larger spread. Interior nodes are placed on the segment between them,
//! spaced in proportion to the original chain length. Groups that are not a
//! simple chain are projected onto the segment instead.

use log::trace;
use nalgebra::Point2;

use crate::error::Result;
use crate::geometry::{UvAxis, DEGENERATE_EPSILON};
use crate::mesh::{MeshIndex, UvMesh};
use crate::node::{UvNodeGroup, UvNodeManager};
use crate::scene::Scene;

/// Walk the chain from `start` to the node with no unvisited neighbour.
///
/// Returns `None` if the walk branches or misses a node.
fn chain_order<I: MeshIndex>(group: &UvNodeGroup<I>, start: usize) -> Option<Vec<usize>> {
    let nodes = group.nodes();
    if nodes.iter().any(|n| n.degree() > 2) {
        return None;
    }

    let mut visited = vec![false; nodes.len()];
    let mut order = vec![start];
    visited[start] = true;
    let mut current = start;

    while let Some(&next) = nodes[current].neighbors().iter().find(|&&n| !visited[n]) {
        visited[next] = true;
        order.push(next);
        current = next;
    }

    (order.len() == nodes.len()).then_some(order)
}

/// Straighten one group and write the result. Returns false when the group
/// was left alone.
pub fn straighten_group<I: MeshIndex>(group: &mut UvNodeGroup<I>, mesh: &mut UvMesh<I>) -> bool {
    if group.len() < 3 {
        return false;
    }

    let axis = UvAxis::of_largest_spread(group.nodes().iter().map(|n| n.uv));
    let Some((first, last)) = group.endpoints(axis) else {
        return false;
    };
    let a = group.nodes()[first].uv;
    let b = group.nodes()[last].uv;
    let dir = b - a;
    let len_sq = dir.norm_squared();
    if len_sq <= DEGENERATE_EPSILON {
        return false;
    }

    let targets: Vec<(usize, Point2<f64>)> = match chain_order(group, first) {
        Some(order) if order.last() == Some(&last) => {
            let nodes = group.nodes();
            let mut lengths = Vec::with_capacity(order.len());
            let mut total = 0.0;
            lengths.push(0.0);
            for pair in order.windows(2) {
                total += (nodes[pair[1]].uv - nodes[pair[0]].uv).norm();
                lengths.push(total);
            }
            if total <= DEGENERATE_EPSILON {
                return false;
            }
            order
                .iter()
                .zip(lengths)
                .map(|(&n, s)| (n, a + dir * (s / total)))
                .collect()
        }
        _ => {
            trace!("group {} is not a simple chain, projecting", group.id());
            group
                .nodes()
                .iter()
                .enumerate()
                .map(|(i, n)| {
                    let t = (n.uv - a).dot(&dir) / len_sq;
                    (i, a + dir * t)
                })
                .collect()
        }
    };

    let nodes = group.nodes_mut();
    for (i, uv) in targets {
        nodes[i].uv = uv;
    }
    group.update_uvs(mesh);
    group.update_bounds();
    true
}

/// Straighten every group of a manager. Returns the number of groups
/// changed.
pub fn straighten_nodes<I: MeshIndex>(
    manager: &mut UvNodeManager<I>,
    scene: &mut Scene<I>,
) -> Result<usize> {
    let mut changed = 0;
    for group in manager.iter_mut() {
        if straighten_group(group, scene.mesh_mut(group.object())?) {
            changed += 1;
        }
    }
    Ok(changed)
}
