//! UV operators built on islands and node groups.
//!
//! - **Align**: line up islands, or nodes, along one UV axis
//! - **Distribute**: stack islands end to end along an axis
//! - **Fit**: rescale islands to a target footprint
//! - **Relax**: Laplacian relaxation of node groups
//! - **Straighten**: put node chains on a straight segment
//!
//! Every operator works through an [`IslandManager`](crate::island::IslandManager)
//! or [`UvNodeManager`](crate::node::UvNodeManager) and only moves UVs. Call
//! the manager's `update_uvmeshes` afterwards to commit the edited objects.

pub mod align;
pub mod distribute;
pub mod fit;
pub mod relax;
pub mod straighten;
