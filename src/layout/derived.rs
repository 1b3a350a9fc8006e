//! Quantities derived once from the plate parameters.

use super::parameters::{LayoutParameters, ManufacturingConstants};
use super::strategy::RowStrategy;

/// Geometry shared by every placement on the plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedGeometry {
    /// Effective cell hole diameter.
    pub diameter: f64,
    /// Half of [`Self::diameter`].
    pub radius: f64,
    /// Centre-to-centre distance between neighbouring cells in a row.
    pub spacing: f64,
    /// Vertical distance between neighbouring rows.
    pub row_height: f64,
    /// Plate outline width.
    pub body_width: f64,
    /// Plate outline height.
    pub body_height: f64,
    /// Balancer wire hole radius.
    pub hole_radius: f64,
}

impl DerivedGeometry {
    /// Resolves the derived quantities.
    ///
    /// Never fails. Zero counts give a body sized for "minus one" cells and
    /// are left for the caller to reject if needed.
    #[must_use]
    #[allow(clippy::suboptimal_flops)] // unfused, body size must round like the reference plates
    pub fn resolve(
        params: &LayoutParameters,
        constants: &ManufacturingConstants,
        strategy: &dyn RowStrategy,
    ) -> Self {
        let diameter = params.effective_diameter();
        let radius = diameter * 0.5;
        let spacing = diameter * constants.spacing_factor;
        let row_height = strategy.row_height(spacing, constants.hex_row_factor);
        let wall = params.wall_thickness;

        let series_spans = f64::from(params.series_cells) - 1.0;
        let parallel_spans = f64::from(params.parallel_cells) - 1.0;

        let body_width =
            series_spans * spacing + diameter + strategy.width_allowance(spacing) + 2.0 * wall;
        let body_height = parallel_spans * row_height + diameter + 2.0 * wall;

        Self {
            diameter,
            radius,
            spacing,
            row_height,
            body_width,
            body_height,
            hole_radius: params.wire_diameter * 0.5,
        }
    }
}
