//! Stacking islands side by side along one axis.

use log::debug;

use crate::error::{Result, UvError};
use crate::geometry::UvAxis;
use crate::island::IslandManager;
use crate::mesh::MeshIndex;
use crate::scene::Scene;

/// Options for [`distribute_islands`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistributeOptions {
    /// Stacking axis. `None` picks the axis along which island centers
    /// spread the most.
    pub axis: Option<UvAxis>,

    /// Gap left between consecutive islands.
    pub margin: f64,
}

impl DistributeOptions {
    /// Stack along a fixed axis.
    pub fn with_axis(mut self, axis: UvAxis) -> Self {
        self.axis = Some(axis);
        self
    }

    /// Set the gap between islands.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

/// Sort islands along an axis and lay them out end to end, starting at the
/// lower edge of all islands together.
///
/// Returns the axis used. An empty manager is left alone.
pub fn distribute_islands<I: MeshIndex>(
    manager: &mut IslandManager<I>,
    scene: &mut Scene<I>,
    options: &DistributeOptions,
) -> Result<UvAxis> {
    if !options.margin.is_finite() || options.margin < 0.0 {
        return Err(UvError::invalid_param(
            "margin",
            options.margin,
            "must be finite and non-negative",
        ));
    }

    let axis = options.axis.unwrap_or_else(|| manager.get_axis_uv());
    if manager.is_empty() {
        return Ok(axis);
    }

    let mut cursor = axis.of(&manager.bounds().min);
    manager.sort_all_islands(|island| axis.of(&island.center()), false);

    for island in manager.iter_mut() {
        let delta = cursor - axis.of(&island.min_uv());
        island.move_by(scene.mesh_mut(island.object())?, axis.unit() * delta);
        cursor += island.bounds().extent(axis) + options.margin;
    }

    debug!("distributed {} islands along {:?}", manager.len(), axis);
    Ok(axis)
}
