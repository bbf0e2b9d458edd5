//! Core mesh data structures.
//!
//! This module provides the editing mesh the UV tools read and write: a
//! polygon mesh with face loops, undirected edges carrying seam flags, 3D
//! selection flags, and any number of per-loop UV layers.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`LoopId`] - Identifies a face corner (where UVs live)
//! - [`EdgeId`] - Identifies an undirected edge
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`]),
//! allowing `u16`, `u32`, or `u64` storage.
//!
//! # Construction
//!
//! ```
//! use uvkit::mesh::{build_with_uvs, UvMesh};
//! use nalgebra::{Point2, Point3};
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2]];
//! let uvs = vec![[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.5, 1.0)]];
//!
//! let mesh: UvMesh = build_with_uvs(&vertices, &faces, &uvs).unwrap();
//! assert!(mesh.active_uv_layer().is_some());
//! ```

mod builder;
mod index;
mod uvmesh;

pub use builder::{build_from_polygons, build_from_triangles, build_with_uvs};
pub use index::{EdgeId, FaceId, LoopId, MeshIndex, UvLayerId, VertexId};
pub use uvmesh::{Edge, Face, FaceLoopIter, Loop, LoopUv, UvLayer, UvMesh, Vertex};
