//! Shape instances placed on the plate.
//!
//! [`PlateModel`] is the hand-off between the layout maths and a script
//! dialect: it lists every primitive with its placement, in output order,
//! and carries the dimensions of the reusable shapes.

use serde::Serialize;

use crate::layout::{LayoutParameters, ManufacturingConstants, PlateLayout, Point};

/// One placed primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeInstance {
    /// Through-hole for a cell.
    Cell {
        /// Hole centre.
        center: Point,
    },
    /// Through-hole for a balancer wire.
    BalancerHole {
        /// Hole centre.
        center: Point,
    },
    /// Insulation ring around a cell hole.
    InsulationRing {
        /// Ring centre.
        center: Point,
        /// Height of the ring's bottom face.
        z: f64,
    },
}

impl ShapeInstance {
    /// Returns the placement on the plate plane.
    #[must_use]
    pub const fn center(&self) -> Point {
        match *self {
            Self::Cell { center }
            | Self::BalancerHole { center }
            | Self::InsulationRing { center, .. } => center,
        }
    }
}

/// A cylinder standing on the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cylinder {
    /// Height along Z.
    pub height: f64,
    /// Diameter.
    pub diameter: f64,
}

/// A flat ring: an outer cylinder minus a concentric inner one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Annulus {
    /// Height along Z.
    pub height: f64,
    /// Outer diameter.
    pub outer_diameter: f64,
    /// Inner diameter.
    pub inner_diameter: f64,
}

/// The plate body: a rounded rectangle extruded to the plate thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlateBody {
    /// Outline width.
    pub width: f64,
    /// Outline height.
    pub height: f64,
    /// Extrusion height.
    pub thickness: f64,
    /// Convex corner radius.
    pub corner_radius: f64,
}

/// Complete description of a spacer plate, ready for serialisation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateModel {
    /// Plate outline.
    pub body: PlateBody,
    /// Cutter used for every cell hole.
    pub cell: Cylinder,
    /// Cutter used for every balancer hole.
    pub balancer_hole: Cylinder,
    /// Ring placed around every cell.
    pub ring: Annulus,
    /// Z position of every cutter, below the bottom face.
    pub cutout_z: f64,
    /// Cell holes then balancer holes, subtracted from the body.
    pub cutouts: Vec<ShapeInstance>,
    /// Insulation rings, added after the body.
    pub rings: Vec<ShapeInstance>,
}

impl PlateModel {
    /// Lays out the plate and enumerates its shapes.
    #[must_use]
    pub fn build(params: &LayoutParameters, constants: &ManufacturingConstants) -> Self {
        let layout = PlateLayout::new(params, constants);
        Self::from_layout(&layout, params, constants)
    }

    /// Enumerates every shape instance for the plate.
    #[must_use]
    pub fn from_layout(
        layout: &PlateLayout,
        params: &LayoutParameters,
        constants: &ManufacturingConstants,
    ) -> Self {
        let g = layout.geometry();
        let cell_centers = layout.cell_centers();
        let holes = layout.balancer_holes();
        let ring_z = params.plate_height - params.ring_height;

        let cutouts: Vec<ShapeInstance> = cell_centers
            .iter()
            .map(|&center| ShapeInstance::Cell { center })
            .chain(
                holes
                    .into_iter()
                    .map(|center| ShapeInstance::BalancerHole { center }),
            )
            .collect();

        let rings: Vec<ShapeInstance> = cell_centers
            .into_iter()
            .map(|center| ShapeInstance::InsulationRing { center, z: ring_z })
            .collect();

        let cutter_height = params.plate_height + constants.cutout_overshoot;

        Self {
            body: PlateBody {
                width: g.body_width,
                height: g.body_height,
                thickness: params.plate_height,
                corner_radius: params.corner_radius,
            },
            cell: Cylinder {
                height: cutter_height,
                diameter: g.diameter,
            },
            balancer_hole: Cylinder {
                height: cutter_height,
                diameter: params.wire_diameter,
            },
            ring: Annulus {
                height: params.ring_height,
                outer_diameter: g.diameter + constants.ring_outer_margin,
                inner_diameter: g.diameter * constants.ring_inner_factor,
            },
            cutout_z: -constants.cutout_overshoot * 0.5,
            cutouts,
            rings,
        }
    }

    /// Number of cell holes.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cutouts
            .iter()
            .filter(|s| matches!(s, ShapeInstance::Cell { .. }))
            .count()
    }

    /// Number of balancer holes.
    #[must_use]
    pub fn balancer_hole_count(&self) -> usize {
        self.cutouts
            .iter()
            .filter(|s| matches!(s, ShapeInstance::BalancerHole { .. }))
            .count()
    }

    /// All instances in output order: cutouts, then rings.
    pub fn instances(&self) -> impl Iterator<Item = &ShapeInstance> {
        self.cutouts.iter().chain(&self.rings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_model() -> PlateModel {
        PlateModel::build(&LayoutParameters::default(), &ManufacturingConstants::default())
    }

    #[test]
    fn counts_for_reference_plate() {
        let model = reference_model();
        assert_eq!(model.cell_count(), 30);
        assert_eq!(model.balancer_hole_count(), 12);
        assert_eq!(model.rings.len(), 30);
        assert_eq!(model.instances().count(), 72);
    }

    #[test]
    fn cells_precede_balancer_holes() {
        let model = reference_model();
        let first_hole = model
            .cutouts
            .iter()
            .position(|s| matches!(s, ShapeInstance::BalancerHole { .. }))
            .unwrap();
        assert_eq!(first_hole, 30);
        assert!(model.cutouts[first_hole..]
            .iter()
            .all(|s| matches!(s, ShapeInstance::BalancerHole { .. })));
    }

    #[test]
    fn rings_follow_cells() {
        let model = reference_model();
        for (cell, ring) in model.cutouts.iter().zip(&model.rings) {
            assert_eq!(cell.center(), ring.center());
            match ring {
                ShapeInstance::InsulationRing { z, .. } => assert!((z - 11.6).abs() < 1e-9),
                other => panic!("unexpected instance {other:?}"),
            }
        }
    }

    #[test]
    fn primitive_dimensions() {
        let model = reference_model();
        assert!((model.cell.height - 14.0).abs() < 1e-9);
        assert!((model.cell.diameter - 18.5).abs() < 1e-9);
        assert!((model.balancer_hole.diameter - 3.0).abs() < 1e-9);
        assert!((model.ring.outer_diameter - 19.0).abs() < 1e-9);
        assert!((model.ring.inner_diameter - 11.1).abs() < 1e-9);
        assert!((model.ring.height - 0.4).abs() < 1e-9);
        assert!((model.cutout_z + 1.0).abs() < 1e-9);
    }

    #[test]
    fn serialises_with_kind_tag() {
        let model = reference_model();
        let json = serde_json::to_value(&model.rings[0]).unwrap();
        assert_eq!(json["kind"], "insulation_ring");
        assert!(json["center"]["x"].is_number());
    }
}
