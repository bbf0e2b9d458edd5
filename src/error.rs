//! Error types for uvkit.
//!
//! This module defines all error types used throughout the library.
//!
//! "Nothing to do" situations (no target objects, no islands, an object
//! without a UV layer during discovery) are not errors; they produce empty
//! results and the calling operator decides what to report.

use thiserror::Error;

use crate::scene::ObjectId;

/// Result type alias using [`UvError`].
pub type Result<T> = std::result::Result<T, UvError>;

/// Errors that can occur during UV editing operations.
#[derive(Error, Debug)]
pub enum UvError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face repeats a vertex or has fewer than three corners.
    #[error("face {face} is degenerate")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// The same directed edge is used by more than one face.
    #[error("directed edge ({v0}, {v1}) is used by more than one face")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// A UV layer was supplied with the wrong number of coordinates.
    #[error("uv layer expects {expected} loop coordinates, got {found}")]
    UvLayerSize {
        /// Number of loops in the mesh.
        expected: usize,
        /// Number of coordinates supplied.
        found: usize,
    },

    /// The object id is not registered in the scene.
    #[error("unknown object {0:?}")]
    UnknownObject(ObjectId),

    /// The object has no active UV layer.
    #[error("object {object:?} has no active uv layer")]
    MissingUvLayer {
        /// The object lacking a layer.
        object: ObjectId,
    },

    /// A host editor primitive failed.
    #[error("host primitive `{primitive}` failed: {message}")]
    HostPrimitive {
        /// Name of the primitive.
        primitive: &'static str,
        /// Failure description.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl UvError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        UvError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create a host primitive failure.
    pub fn host(primitive: &'static str, message: impl Into<String>) -> Self {
        UvError::HostPrimitive {
            primitive,
            message: message.into(),
        }
    }
}
