//! OpenSCAD script output.
//!
//! Renders a [`PlateModel`] as a CSG script for an external geometry kernel.
//! Nothing is evaluated here: malformed geometry (negative sizes, NaN) is
//! written verbatim and only fails when the kernel reads it.
//!
//! # Script Layout
//!
//! ```text
//! module cell(){...}               // reusable shapes
//! module ring(){...}
//! module bh(){...}
//! difference(){
//! linear_extrude(...) ... square([W,H]);   // plate body
//! translate([x,y,z])cell();                // one per cell
//! translate([x,y,z])bh();                  // one per balancer hole
//! }
//! translate([x,y,z])ring();                // one per cell
//! ```

pub mod error;
pub mod format;

pub use error::{ScadError, ScadResult};
pub use format::{format_number, DEFAULT_PRECISION};

use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::{Annulus, Cylinder, PlateBody, PlateModel, ShapeInstance};

/// A CSG script syntax.
pub trait ScriptDialect {
    /// Renders the whole plate as script text.
    fn render(&self, model: &PlateModel) -> String;
}

/// Output tuning for OpenSCAD scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScadOptions {
    /// Significant digits for every emitted number.
    pub precision: usize,
    /// `$fn` for cell cutters.
    pub cell_segments: u32,
    /// `$fn` for balancer hole cutters.
    pub hole_segments: u32,
    /// `$fn` for insulation rings.
    pub ring_segments: u32,
}

impl Default for ScadOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            cell_segments: 100,
            hole_segments: 40,
            ring_segments: 100,
        }
    }
}

/// The OpenSCAD dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenScad {
    options: ScadOptions,
}

impl OpenScad {
    /// Creates a renderer with the given options.
    #[must_use]
    pub const fn new(options: ScadOptions) -> Self {
        Self { options }
    }

    fn num(&self, value: f64) -> String {
        format_number(value, self.options.precision)
    }

    fn cylinder(&self, shape: Cylinder, segments: u32) -> String {
        format!(
            "cylinder(h={},d={},$fn={segments});",
            self.num(shape.height),
            self.num(shape.diameter)
        )
    }

    fn annulus(&self, shape: Annulus) -> String {
        let segments = self.options.ring_segments;
        let outer = Cylinder {
            height: shape.height,
            diameter: shape.outer_diameter,
        };
        let inner = Cylinder {
            height: shape.height,
            diameter: shape.inner_diameter,
        };
        format!(
            "difference(){{{}{}}}",
            self.cylinder(outer, segments),
            self.cylinder(inner, segments)
        )
    }

    /// Rounded outline: grow by the radius, then shrink back.
    ///
    /// A zero radius gives the plain rectangle.
    fn body(&self, body: PlateBody) -> String {
        let square = format!("square([{},{}]);", self.num(body.width), self.num(body.height));
        let extrude = format!("linear_extrude({})", self.num(body.thickness));
        if body.corner_radius == 0.0 {
            format!("{extrude} {square}")
        } else {
            format!(
                "{extrude} offset(r={})offset(delta={}){square}",
                self.num(body.corner_radius),
                self.num(-body.corner_radius)
            )
        }
    }

    fn placement(&self, instance: &ShapeInstance, cutout_z: f64) -> String {
        let (z, module) = match *instance {
            ShapeInstance::Cell { .. } => (cutout_z, "cell"),
            ShapeInstance::BalancerHole { .. } => (cutout_z, "bh"),
            ShapeInstance::InsulationRing { z, .. } => (z, "ring"),
        };
        let c = instance.center();
        format!(
            "translate([{},{},{}]){module}();",
            self.num(c.x),
            self.num(c.y),
            self.num(z)
        )
    }
}

impl ScriptDialect for OpenScad {
    fn render(&self, model: &PlateModel) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "module cell(){{{}}}",
            self.cylinder(model.cell, self.options.cell_segments)
        );
        let _ = writeln!(out, "module ring(){{{}}}", self.annulus(model.ring));
        let _ = writeln!(
            out,
            "module bh(){{{}}}",
            self.cylinder(model.balancer_hole, self.options.hole_segments)
        );

        out.push_str("difference(){\n");
        let _ = writeln!(out, "{}", self.body(model.body));
        for instance in &model.cutouts {
            let _ = writeln!(out, "{}", self.placement(instance, model.cutout_z));
        }
        out.push_str("}\n");

        for instance in &model.rings {
            let _ = writeln!(out, "{}", self.placement(instance, model.cutout_z));
        }

        out
    }
}

/// Writes a rendered script to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ScadError::FileWrite`] if the file cannot be created or written.
pub fn save(path: &Path, script: &str) -> ScadResult<()> {
    let file = File::create(path).map_err(|e| ScadError::file_write(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(script.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| ScadError::file_write(path, e))?;

    info!(path = %path.display(), bytes = script.len(), "Wrote OpenSCAD script");
    Ok(())
}

/// Writes a rendered script to standard output.
///
/// # Errors
///
/// Returns [`ScadError::Stdout`] if stdout is closed.
pub fn print(script: &str) -> ScadResult<()> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(script.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|source| ScadError::Stdout { source })
}
