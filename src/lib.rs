//! battery-spacer: spacer plates for cylindrical battery modules
//!
//! Computes the layout of a perforated plate that holds a grid of
//! cylindrical cells and emits it as an OpenSCAD script. The script is
//! evaluated by an external CAD kernel; this crate never builds geometry.
//!
//! # Pipeline
//!
//! ```text
//! LayoutParameters ─▶ DerivedGeometry ─▶ PlateLayout ─▶ PlateModel ─▶ script text
//! ```
//!
//! - Parameters are combined into pitch, row height and body size
//! - Cell centres and balancer gap positions are placed per row strategy
//! - Every hole and ring becomes a [`model::ShapeInstance`]
//! - A [`scad::ScriptDialect`] renders the model
//!
//! # Example
//!
//! ```
//! use battery_spacer::layout::{LayoutParameters, ManufacturingConstants};
//! use battery_spacer::model::PlateModel;
//! use battery_spacer::scad::{OpenScad, ScriptDialect};
//!
//! let model = PlateModel::build(&LayoutParameters::default(), &ManufacturingConstants::default());
//! let script = OpenScad::default().render(&model);
//! assert!(script.starts_with("module cell()"));
//! ```
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Error types
//! - [`layout`] — Cell and gap placement
//! - [`model`] — Shape instances
//! - [`scad`] — OpenSCAD output

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod scad;
