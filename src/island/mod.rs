//! UV islands.
//!
//! An island is a maximal set of faces connected without crossing a seam or
//! a UV discontinuity. [`find_islands`] discovers them on one mesh and
//! [`IslandManager`] runs discovery over several objects and keeps the
//! results for the length of an operator call.

mod discovery;
#[allow(clippy::module_inception)]
mod island;
mod manager;

pub use discovery::{find_islands, flood_fill_islands, FaceComponent, IslandOptions};
pub use island::Island;
pub use manager::IslandManager;
