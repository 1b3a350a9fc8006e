//! Plate input parameters and manufacturing constants.
//!
//! All lengths are in millimetres. Both structures deserialise from the
//! configuration file with every field optional; missing fields take the
//! documented defaults.

use serde::{Deserialize, Serialize};

/// Fixed inputs describing one spacer plate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutParameters {
    /// Cells per row (series direction).
    #[serde(default = "default_series_cells")]
    pub series_cells: u32,

    /// Number of rows (parallel direction).
    #[serde(default = "default_parallel_cells")]
    pub parallel_cells: u32,

    /// Offset every odd row by half a pitch (hexagonal packing).
    #[serde(default = "default_true")]
    pub slanted: bool,

    /// Nominal cell diameter.
    #[serde(default = "default_cell_diameter")]
    pub cell_diameter: f64,

    /// Printer/fit allowance added to the cell diameter.
    #[serde(default = "default_diameter_adjust")]
    pub diameter_adjust: f64,

    /// Margin between the outermost cell holes and the plate edge.
    #[serde(default = "default_wall_thickness")]
    pub wall_thickness: f64,

    /// Plate thickness.
    #[serde(default = "default_plate_height")]
    pub plate_height: f64,

    /// Corner rounding radius of the plate outline.
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f64,

    /// Balancer wire hole diameter.
    #[serde(default = "default_wire_diameter")]
    pub wire_diameter: f64,

    /// Insulation ring height.
    #[serde(default = "default_ring_height")]
    pub ring_height: f64,
}

impl Default for LayoutParameters {
    fn default() -> Self {
        Self {
            series_cells: default_series_cells(),
            parallel_cells: default_parallel_cells(),
            slanted: default_true(),
            cell_diameter: default_cell_diameter(),
            diameter_adjust: default_diameter_adjust(),
            wall_thickness: default_wall_thickness(),
            plate_height: default_plate_height(),
            corner_radius: default_corner_radius(),
            wire_diameter: default_wire_diameter(),
            ring_height: default_ring_height(),
        }
    }
}

impl LayoutParameters {
    /// Effective hole diameter (`cell_diameter + diameter_adjust`).
    #[must_use]
    pub fn effective_diameter(&self) -> f64 {
        self.cell_diameter + self.diameter_adjust
    }

    /// Checks that the parameters describe a meaningful plate.
    ///
    /// Layout computation itself never rejects input; this is used to fail
    /// fast on configuration that would only produce degenerate geometry.
    ///
    /// # Errors
    ///
    /// Returns a description of the first offending parameter.
    #[allow(clippy::neg_cmp_op_on_partial_ord)] // NaN must be rejected too
    pub fn check(&self) -> Result<(), String> {
        if self.series_cells == 0 {
            return Err("series_cells must be at least 1".to_string());
        }
        if self.parallel_cells == 0 {
            return Err("parallel_cells must be at least 1".to_string());
        }
        let positive = [
            ("cell_diameter + diameter_adjust", self.effective_diameter()),
            ("plate_height", self.plate_height),
            ("wire_diameter", self.wire_diameter),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        let non_negative = [
            ("wall_thickness", self.wall_thickness),
            ("corner_radius", self.corner_radius),
            ("ring_height", self.ring_height),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(format!("{name} must not be negative, got {value}"));
            }
        }
        Ok(())
    }
}

const fn default_series_cells() -> u32 {
    6
}

const fn default_parallel_cells() -> u32 {
    5
}

const fn default_true() -> bool {
    true
}

const fn default_cell_diameter() -> f64 {
    18.3
}

const fn default_diameter_adjust() -> f64 {
    0.2
}

const fn default_wall_thickness() -> f64 {
    5.0
}

const fn default_plate_height() -> f64 {
    12.0
}

const fn default_corner_radius() -> f64 {
    8.0
}

const fn default_wire_diameter() -> f64 {
    3.0
}

const fn default_ring_height() -> f64 {
    0.4
}

/// Tuning values shared by every plate.
///
/// These are empirical print clearances. Changing them changes the fit of
/// the printed part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManufacturingConstants {
    /// Centre-to-centre pitch as a multiple of the effective diameter.
    #[serde(default = "default_spacing_factor")]
    pub spacing_factor: f64,

    /// Row height as a multiple of the pitch in staggered layouts (≈ sin 60°).
    #[serde(default = "default_hex_row_factor")]
    pub hex_row_factor: f64,

    /// Added to the effective diameter to get the ring's outer diameter.
    #[serde(default = "default_ring_outer_margin")]
    pub ring_outer_margin: f64,

    /// Ring inner diameter as a multiple of the effective diameter.
    #[serde(default = "default_ring_inner_factor")]
    pub ring_inner_factor: f64,

    /// Extra length of through-hole cutters beyond the plate thickness,
    /// split evenly between both faces.
    #[serde(default = "default_cutout_overshoot")]
    pub cutout_overshoot: f64,
}

impl Default for ManufacturingConstants {
    fn default() -> Self {
        Self {
            spacing_factor: default_spacing_factor(),
            hex_row_factor: default_hex_row_factor(),
            ring_outer_margin: default_ring_outer_margin(),
            ring_inner_factor: default_ring_inner_factor(),
            cutout_overshoot: default_cutout_overshoot(),
        }
    }
}

const fn default_spacing_factor() -> f64 {
    1.042
}

const fn default_hex_row_factor() -> f64 {
    0.866
}

const fn default_ring_outer_margin() -> f64 {
    0.5
}

const fn default_ring_inner_factor() -> f64 {
    0.6
}

const fn default_cutout_overshoot() -> f64 {
    2.0
}

/// Nominal diameters of common cylindrical cell formats.
///
/// Returns the diameter in mm, or `None` for an unknown format code.
#[must_use]
pub fn standard_cell_diameter(code: &str) -> Option<f64> {
    match code.trim().to_uppercase().as_str() {
        "14500" | "AA" => Some(14.2),
        "18650" => Some(18.3),
        "20700" => Some(20.2),
        "21700" => Some(21.2),
        "26650" => Some(26.2),
        "32700" | "32650" => Some(32.2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_plate() {
        let params = LayoutParameters::default();
        assert_eq!(params.series_cells, 6);
        assert_eq!(params.parallel_cells, 5);
        assert!(params.slanted);
        assert!((params.effective_diameter() - 18.5).abs() < 1e-12);
        assert!(params.check().is_ok());
    }

    #[test]
    fn constants_defaults() {
        let constants = ManufacturingConstants::default();
        assert!((constants.spacing_factor - 1.042).abs() < f64::EPSILON);
        assert!((constants.hex_row_factor - 0.866).abs() < f64::EPSILON);
        assert!((constants.ring_outer_margin - 0.5).abs() < f64::EPSILON);
        assert!((constants.ring_inner_factor - 0.6).abs() < f64::EPSILON);
        assert!((constants.cutout_overshoot - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn check_rejects_zero_counts() {
        let params = LayoutParameters {
            series_cells: 0,
            ..LayoutParameters::default()
        };
        let err = params.check().unwrap_err();
        assert!(err.contains("series_cells"));

        let params = LayoutParameters {
            parallel_cells: 0,
            ..LayoutParameters::default()
        };
        assert!(params.check().unwrap_err().contains("parallel_cells"));
    }

    #[test]
    fn check_rejects_non_positive_diameters() {
        let params = LayoutParameters {
            cell_diameter: 0.2,
            diameter_adjust: -0.2,
            ..LayoutParameters::default()
        };
        assert!(params.check().unwrap_err().contains("cell_diameter"));

        let params = LayoutParameters {
            wire_diameter: -1.0,
            ..LayoutParameters::default()
        };
        assert!(params.check().unwrap_err().contains("wire_diameter"));
    }

    #[test]
    fn check_rejects_nan() {
        let params = LayoutParameters {
            plate_height: f64::NAN,
            ..LayoutParameters::default()
        };
        assert!(params.check().is_err());
    }

    #[test]
    fn check_allows_zero_wall_and_corner() {
        let params = LayoutParameters {
            wall_thickness: 0.0,
            corner_radius: 0.0,
            ring_height: 0.0,
            ..LayoutParameters::default()
        };
        assert!(params.check().is_ok());
    }

    #[test]
    fn standard_formats() {
        assert_eq!(standard_cell_diameter("18650"), Some(18.3));
        assert_eq!(standard_cell_diameter(" 21700 "), Some(21.2));
        assert_eq!(standard_cell_diameter("aa"), Some(14.2));
        assert!(standard_cell_diameter("9V").is_none());
    }

    #[test]
    fn parse_partial_parameters() {
        let json = r#"{ "series_cells": 4, "slanted": false }"#;
        let params: LayoutParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.series_cells, 4);
        assert!(!params.slanted);
        assert_eq!(params.parallel_cells, 5);
    }
}
