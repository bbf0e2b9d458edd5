//! Alignment of islands and nodes along a UV axis.
//!
//! # Example
//!
//! ```
//! use uvkit::prelude::*;
//! use uvkit::algo::align::{align_islands, AlignMode, AlignOptions};
//! use nalgebra::{Point2, Point3};
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2], [0, 2, 3]];
//! let uvs = vec![
//!     [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)],
//!     [Point2::new(3.0, 2.0), Point2::new(4.0, 3.0), Point2::new(3.0, 3.0)],
//! ];
//! let mut scene: Scene = Scene::new();
//! scene.add_object("quad", build_with_uvs(&vertices, &faces, &uvs).unwrap());
//!
//! let mut host = NativeHost::new();
//! let options = IslandOptions::default().with_find_all(true).with_sync(true);
//! let mut islands = IslandManager::from_scene(&mut scene, &mut host, options).unwrap();
//!
//! let align = AlignOptions::default().with_axis(UvAxis::V).with_mode(AlignMode::Min);
//! align_islands(&mut islands, &mut scene, &align).unwrap();
//! assert!(islands.iter().all(|i| i.min_uv().y == 0.0));
//! ```

use crate::error::Result;
use crate::geometry::{UvAxis, UvBounds};
use crate::island::IslandManager;
use crate::mesh::MeshIndex;
use crate::node::UvNodeManager;
use crate::scene::Scene;

/// Which side of the bounds to line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignMode {
    /// Lower edge.
    Min,
    /// Middle.
    #[default]
    Center,
    /// Upper edge.
    Max,
}

impl AlignMode {
    /// Coordinate of this side of `bounds` along `axis`.
    pub fn pick(self, bounds: &UvBounds, axis: UvAxis) -> f64 {
        match self {
            AlignMode::Min => axis.of(&bounds.min),
            AlignMode::Center => axis.of(&bounds.center()),
            AlignMode::Max => axis.of(&bounds.max),
        }
    }
}

/// Options for alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlignOptions {
    /// Axis along which positions are matched.
    pub axis: UvAxis,
    /// Side of the bounds to match.
    pub mode: AlignMode,
}

impl AlignOptions {
    /// Set the axis.
    pub fn with_axis(mut self, axis: UvAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Set the mode.
    pub fn with_mode(mut self, mode: AlignMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Move every island so its chosen side matches that of all islands
/// together.
pub fn align_islands<I: MeshIndex>(
    manager: &mut IslandManager<I>,
    scene: &mut Scene<I>,
    options: &AlignOptions,
) -> Result<()> {
    let target = options.mode.pick(&manager.bounds(), options.axis);

    for island in manager.iter_mut() {
        let delta = target - options.mode.pick(island.bounds(), options.axis);
        if delta == 0.0 {
            continue;
        }
        island.move_by(scene.mesh_mut(island.object())?, options.axis.unit() * delta);
    }
    Ok(())
}

/// Put every node on one line across the axis, at the chosen side of all
/// nodes together.
pub fn align_nodes<I: MeshIndex>(
    manager: &mut UvNodeManager<I>,
    scene: &mut Scene<I>,
    options: &AlignOptions,
) -> Result<()> {
    let target = options.mode.pick(&manager.bounds(), options.axis);

    for group in manager.iter_mut() {
        for node in group.nodes_mut() {
            match options.axis {
                UvAxis::U => node.uv.x = target,
                UvAxis::V => node.uv.y = target,
            }
        }
        group.update_uvs(scene.mesh_mut(group.object())?);
        group.update_bounds();
    }
    Ok(())
}
