//! Rescaling islands to a target footprint.
//!
//! Islands with a zero width or height (every UV on one line or one point)
//! are never divided by that dimension; the degenerate axis keeps scale 1.

use nalgebra::Vector2;

use crate::error::{Result, UvError};
use crate::geometry::{safe_scale, DEGENERATE_EPSILON};
use crate::island::{Island, IslandManager};
use crate::mesh::MeshIndex;
use crate::scene::Scene;

/// Options for [`fit_islands`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Target width.
    pub width: f64,

    /// Target height.
    pub height: f64,

    /// Scale both axes by the same factor, the smaller of the two.
    pub uniform: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            uniform: true,
        }
    }
}

impl FitOptions {
    /// Set the target size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Allow different factors per axis.
    pub fn non_uniform(mut self) -> Self {
        self.uniform = false;
        self
    }
}

/// Per-axis factors that would scale `island` to the target size.
///
/// A degenerate axis yields 1.0.
pub fn island_scale_factors<I: MeshIndex>(
    island: &Island<I>,
    target_width: f64,
    target_height: f64,
) -> Vector2<f64> {
    Vector2::new(
        safe_scale(target_width, island.width()),
        safe_scale(target_height, island.height()),
    )
}

/// Uniform factor: the smaller factor over the non-degenerate axes.
fn uniform_factor<I: MeshIndex>(island: &Island<I>, factors: &Vector2<f64>) -> f64 {
    let mut k = f64::INFINITY;
    if island.width() > DEGENERATE_EPSILON {
        k = k.min(factors.x);
    }
    if island.height() > DEGENERATE_EPSILON {
        k = k.min(factors.y);
    }
    if k.is_finite() {
        k
    } else {
        1.0
    }
}

/// Scale every island about its center to the target size.
pub fn fit_islands<I: MeshIndex>(
    manager: &mut IslandManager<I>,
    scene: &mut Scene<I>,
    options: &FitOptions,
) -> Result<()> {
    for (name, value) in [("width", options.width), ("height", options.height)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(UvError::invalid_param(name, value, "must be finite and positive"));
        }
    }

    for island in manager.iter_mut() {
        let mut factors = island_scale_factors(island, options.width, options.height);
        if options.uniform {
            let k = uniform_factor(island, &factors);
            factors = Vector2::new(k, k);
        }
        let pivot = island.center();
        island.scale_about(scene.mesh_mut(island.object())?, factors, pivot);
    }
    Ok(())
}

/// Scale every island back to the footprint it had when discovered and
/// put it back on its original center.
pub fn restore_islands_footprint<I: MeshIndex>(
    manager: &mut IslandManager<I>,
    scene: &mut Scene<I>,
) -> Result<()> {
    for island in manager.iter_mut() {
        let factors = Vector2::new(
            safe_scale(island.original_width(), island.width()),
            safe_scale(island.original_height(), island.height()),
        );
        let mesh = scene.mesh_mut(island.object())?;
        let pivot = island.center();
        island.scale_about(mesh, factors, pivot);
        let offset = island.original_center() - island.center();
        island.move_by(mesh, offset);
    }
    Ok(())
}
