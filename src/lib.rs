//! # uvkit
//!
//! Topology and selection core for UV editing operators.
//!
//! uvkit finds the pieces a UV tool works on and keeps the editor's
//! selection state intact while doing so. The tools themselves (align,
//! distribute, fit, relax, straighten) are thin layers over two models:
//!
//! - **Islands**: face sets that are connected in UV space, discovered per
//!   object and managed across many objects by [`island::IslandManager`]
//! - **Nodes**: coincident UV corners merged into graph nodes, grouped into
//!   connected [`node::UvNodeGroup`]s by [`node::UvNodeManager`]
//!
//! ## Features
//!
//! - **Editing mesh**: polygon faces, loops, seams, selection flags and any
//!   number of UV layers, with type-safe generic indices
//! - **Selection sync**: mirror UV and 3D selection in either direction
//! - **Snapshots**: every step that edits selection or seams restores them,
//!   on success and on failure
//! - **Host seam**: seam marking, linked selection and mesh commits go
//!   through the [`host::EditorHost`] trait
//!
//! ## Quick Start
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
//! let faces = vec![[0, 1, 2], [0, 2, 3]];
//! // Second triangle is cut away in UV
//! let uvs = vec![
//!     [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
//!     [Point2::new(2.0, 0.0), Point2::new(3.0, 1.0), Point2::new(2.0, 1.0)],
//! ];
//!
//! let mut scene: Scene = Scene::new();
//! let id = scene.add_object("quad", build_with_uvs(&vertices, &faces, &uvs).unwrap());
//!
//! let mut host = NativeHost::new();
//! let options = IslandOptions::default().with_find_all(true).with_sync(true);
//! let mut islands = IslandManager::from_scene(&mut scene, &mut host, options).unwrap();
//! assert_eq!(islands.len(), 2);
//!
//! // Move everything and commit once per object
//! islands.move_all(&mut scene, nalgebra::Vector2::new(0.5, 0.0)).unwrap();
//! islands.update_uvmeshes(&scene, &mut host).unwrap();
//! assert_eq!(host.flush_count(id), 1);
//! ```
//!
//! ## Node Graphs
//!
//! ```
//! use uvkit::prelude::*;
//! use nalgebra::{Point2, Point3};
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(1.0, 1.0, 0.0),
//! #     Point3::new(0.0, 1.0, 0.0),
//! # ];
//! # let uvs = vec![[
//! #     Point2::new(0.0, 0.0),
//! #     Point2::new(1.0, 0.0),
//! #     Point2::new(1.0, 1.0),
//! #     Point2::new(0.0, 1.0),
//! # ]];
//! let mut scene: Scene = Scene::new();
//! scene.add_object("quad", build_with_uvs(&vertices, &[[0, 1, 2, 3]], &uvs).unwrap());
//!
//! let ids: Vec<ObjectId> = scene.object_ids().collect();
//! let nodes = UvNodeManager::new(&scene, &ids, NodeOptions::default().all_loops()).unwrap();
//! assert_eq!(nodes.len(), 1);
//! assert_eq!(nodes.node_count(), 4);
//! assert_eq!(nodes.groups()[0].width(), 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod geometry;
pub mod host;
pub mod island;
pub mod mesh;
pub mod node;
pub mod scene;
pub mod selection;
pub mod sync;

#[cfg(test)]
mod fixtures;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use uvkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, UvError};
    pub use crate::geometry::{Axis3, Orientation, UvAxis, UvBounds};
    pub use crate::host::{EditorHost, NativeHost};
    pub use crate::island::{find_islands, Island, IslandManager, IslandOptions};
    pub use crate::mesh::{
        build_from_polygons, build_from_triangles, build_with_uvs, EdgeId, FaceId, LoopId,
        MeshIndex, UvLayerId, UvMesh, VertexId,
    };
    pub use crate::node::{NodeMode, NodeOptions, UvNode, UvNodeGroup, UvNodeManager};
    pub use crate::scene::{
        EditObject, MeshSelectMode, ObjectId, Scene, ToolSettings, UvSelectMode,
    };
    pub use crate::selection::{EditStateSnapshot, MeshSelectionSnapshot, UvSelectionSnapshot};
    pub use crate::sync::{sync_mesh_from_uv, sync_uv_from_mesh};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
