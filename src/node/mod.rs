//! UV nodes and node groups.
//!
//! A node merges the loops of one vertex that share a UV position, so that
//! vertex-level operators move each UV corner once and every loop follows.
//! Nodes are linked by the adjacency rule of a [`NodeMode`] and split into
//! connected [`UvNodeGroup`]s.
//!
//! # Example
//!
//! ```
//! use uvkit::prelude::*;
//! use nalgebra::{Point2, Point3};
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2, 3]];
//! let uvs = vec![[
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ]];
//! let mut scene: Scene = Scene::new();
//! let id = scene.add_object("quad", build_with_uvs(&vertices, &faces, &uvs).unwrap());
//!
//! let options = NodeOptions::default().all_loops();
//! let mut nodes = UvNodeManager::new(&scene, &[id], options).unwrap();
//! assert_eq!(nodes.len(), 1);
//! assert_eq!(nodes.node_count(), 4);
//!
//! for group in nodes.iter_mut() {
//!     for node in group.nodes_mut() {
//!         node.uv *= 0.5;
//!     }
//! }
//! nodes.update_uvs(&mut scene).unwrap();
//! ```

mod builder;
mod group;
#[allow(clippy::module_inception)]
mod node;
mod manager;

pub use builder::{build_node_groups, build_nodes, group_nodes, NodeMode, NodeOptions};
pub use group::UvNodeGroup;
pub use manager::UvNodeManager;
pub use node::{NodeKey, UvNode};
