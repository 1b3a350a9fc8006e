//! Row arrangement strategies.
//!
//! A plate either stacks its rows directly on top of each other
//! ([`AlignedRows`]) or shifts every odd row by half a pitch
//! ([`StaggeredRows`]), which approximates hexagonal close-packing. The
//! strategy is the only place the two layouts differ.

use std::fmt;

/// Per-layout rules for row placement.
pub trait RowStrategy: fmt::Debug + Sync {
    /// Horizontal shift applied to every cell and gap in `row`.
    fn row_offset(&self, row: u32, spacing: f64) -> f64;

    /// Vertical distance between adjacent row centres.
    fn row_height(&self, spacing: f64, hex_row_factor: f64) -> f64;

    /// Number of gap candidates in a row of `series_cells` cells.
    fn gap_candidates(&self, series_cells: u32) -> u32;

    /// Extra body width needed so shifted rows stay inside the plate.
    fn width_allowance(&self, spacing: f64) -> f64;
}

/// Rows stacked in a plain rectangular grid.
///
/// Each row has a gap before the first cell and after the last one, so a
/// row of `n` cells yields `n + 1` gap candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlignedRows;

impl RowStrategy for AlignedRows {
    fn row_offset(&self, _row: u32, _spacing: f64) -> f64 {
        0.0
    }

    fn row_height(&self, spacing: f64, _hex_row_factor: f64) -> f64 {
        spacing
    }

    fn gap_candidates(&self, series_cells: u32) -> u32 {
        series_cells.saturating_add(1)
    }

    fn width_allowance(&self, _spacing: f64) -> f64 {
        0.0
    }
}

/// Odd rows shifted right by half a pitch.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaggeredRows;

impl RowStrategy for StaggeredRows {
    fn row_offset(&self, row: u32, spacing: f64) -> f64 {
        if row % 2 == 1 {
            spacing * 0.5
        } else {
            0.0
        }
    }

    fn row_height(&self, spacing: f64, hex_row_factor: f64) -> f64 {
        spacing * hex_row_factor
    }

    fn gap_candidates(&self, series_cells: u32) -> u32 {
        series_cells
    }

    fn width_allowance(&self, spacing: f64) -> f64 {
        spacing * 0.5
    }
}

static ALIGNED: AlignedRows = AlignedRows;
static STAGGERED: StaggeredRows = StaggeredRows;

/// Returns the strategy for the `slanted` flag.
#[must_use]
pub fn for_slanted(slanted: bool) -> &'static dyn RowStrategy {
    if slanted {
        &STAGGERED
    } else {
        &ALIGNED
    }
}
