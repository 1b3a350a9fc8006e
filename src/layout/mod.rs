//! Spacer plate layout.
//!
//! Turns [`LayoutParameters`] into cell centres and balancer hole positions.
//! Everything here is pure: no I/O, no validation, and no value is changed
//! after construction.
//!
//! # Coordinates
//!
//! The plate's lower-left corner is the origin. Row 0 runs along the bottom
//! wall, columns count left to right. All lengths are millimetres.
//!
//! # Example
//!
//! ```
//! use battery_spacer::layout::{LayoutParameters, ManufacturingConstants, PlateLayout};
//!
//! let params = LayoutParameters::default();
//! let layout = PlateLayout::new(&params, &ManufacturingConstants::default());
//!
//! assert_eq!(layout.cell_centers().len(), 30);
//! println!("body: {} x {}", layout.geometry().body_width, layout.geometry().body_height);
//! ```

pub mod derived;
pub mod parameters;
pub mod strategy;

pub use derived::DerivedGeometry;
pub use parameters::{standard_cell_diameter, LayoutParameters, ManufacturingConstants};
pub use strategy::{AlignedRows, RowStrategy, StaggeredRows};

use serde::Serialize;
use tracing::debug;

/// A point on the plate plane (mm).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Cell and gap placement for one plate.
#[derive(Debug, Clone)]
pub struct PlateLayout {
    series_cells: u32,
    parallel_cells: u32,
    wall_thickness: f64,
    geometry: DerivedGeometry,
    strategy: &'static dyn RowStrategy,
}

impl PlateLayout {
    /// Resolves the derived geometry and picks the row strategy.
    #[must_use]
    pub fn new(params: &LayoutParameters, constants: &ManufacturingConstants) -> Self {
        let strategy = strategy::for_slanted(params.slanted);
        let geometry = DerivedGeometry::resolve(params, constants, strategy);

        debug!(
            diameter = geometry.diameter,
            spacing = geometry.spacing,
            row_height = geometry.row_height,
            body_width = geometry.body_width,
            body_height = geometry.body_height,
            ?strategy,
            "Resolved plate geometry"
        );

        Self {
            series_cells: params.series_cells,
            parallel_cells: params.parallel_cells,
            wall_thickness: params.wall_thickness,
            geometry,
            strategy,
        }
    }

    /// Returns the derived geometry.
    #[must_use]
    pub const fn geometry(&self) -> &DerivedGeometry {
        &self.geometry
    }

    /// Centre of the cell at `(column, row)`.
    #[must_use]
    #[allow(clippy::suboptimal_flops)] // unfused, coordinates must round like the reference plates
    pub fn cell_center(&self, column: u32, row: u32) -> Point {
        let g = &self.geometry;
        let offset = self.strategy.row_offset(row, g.spacing);
        Point::new(
            f64::from(column) * g.spacing + offset + g.radius + self.wall_thickness,
            f64::from(row) * g.row_height + g.radius + self.wall_thickness,
        )
    }

    /// All cell centres, row by row, columns inner.
    #[must_use]
    pub fn cell_centers(&self) -> Vec<Point> {
        (0..self.parallel_cells)
            .flat_map(|row| (0..self.series_cells).map(move |column| (column, row)))
            .map(|(column, row)| self.cell_center(column, row))
            .collect()
    }

    /// Unfiltered gap x-positions for `row`.
    ///
    /// Gap `i` sits half a pitch to the right of cell `i`.
    #[must_use]
    #[allow(clippy::suboptimal_flops)] // unfused, a boundary gap must not move by an ulp
    pub fn gap_candidates(&self, row: u32) -> Vec<f64> {
        let g = &self.geometry;
        let offset = self.strategy.row_offset(row, g.spacing);

        (0..self.strategy.gap_candidates(self.series_cells))
            .map(|i| {
                f64::from(i) * g.spacing + g.radius + self.wall_thickness + g.spacing * 0.5 + offset
            })
            .collect()
    }

    /// Gap x-positions for `row` that leave room for a balancer hole.
    ///
    /// Candidates outside `[hole_radius, body_width - hole_radius]` are
    /// dropped. Both ends are inclusive.
    #[must_use]
    pub fn gap_x_positions(&self, row: u32) -> Vec<f64> {
        let g = &self.geometry;
        self.gap_candidates(row)
            .into_iter()
            .filter(|&x| fits_on_plate(x, g.hole_radius, g.body_width))
            .collect()
    }

    /// Balancer hole centres: gaps of the first row, then of the last row.
    ///
    /// First-row holes run along the top wall, last-row holes along the
    /// bottom wall. Interior rows never get holes.
    #[must_use]
    pub fn balancer_holes(&self) -> Vec<Point> {
        let Some(last_row) = self.parallel_cells.checked_sub(1) else {
            return Vec::new();
        };

        let g = &self.geometry;
        let y_top = g.body_height - self.wall_thickness - g.hole_radius;
        let y_bottom = self.wall_thickness + g.hole_radius;

        let mut holes = Vec::new();
        for (row, y) in [(0, y_top), (last_row, y_bottom)] {
            let xs = self.gap_x_positions(row);
            if xs.is_empty() {
                debug!(row, "No room for balancer holes in row");
            }
            holes.extend(xs.into_iter().map(|x| Point::new(x, y)));
        }
        holes
    }
}

/// Returns `true` if a hole of `hole_radius` centred at `x` fits inside a
/// plate of `body_width`.
#[must_use]
pub fn fits_on_plate(x: f64, hole_radius: f64, body_width: f64) -> bool {
    x >= hole_radius && x <= body_width - hole_radius
}
