//! battery-spacer: battery module spacer plate generator
//!
//! Lays out a grid of cylindrical cells, balancer wire holes and insulation
//! rings, and writes the plate as an OpenSCAD script.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use battery_spacer::config::{self, Config};
use battery_spacer::layout::standard_cell_diameter;
use battery_spacer::model::PlateModel;
use battery_spacer::scad::{self, OpenScad, ScriptDialect};

/// Battery module spacer plate generator.
///
/// Writes an OpenSCAD script describing a perforated plate for a grid of
/// cylindrical cells, with balancer wire holes and insulation rings.
#[derive(Parser, Debug)]
#[command(name = "battery-spacer")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Output script path (overrides the configuration)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Write the script to stdout instead of a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Print the computed placements as JSON to stdout instead of a script
    #[arg(long, conflicts_with = "output")]
    layout_json: bool,

    /// Cells per row
    #[arg(long, value_name = "N")]
    series: Option<u32>,

    /// Number of rows
    #[arg(long, value_name = "N")]
    parallel: Option<u32>,

    /// Stack rows directly instead of staggering odd rows
    #[arg(long)]
    aligned: bool,

    /// Standard cell format (14500, 18650, 20700, 21700, 26650, 32700)
    #[arg(long, value_name = "FORMAT")]
    cell: Option<String>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(cfg: &mut Config, args: &Args) -> Result<(), String> {
    if let Some(series) = args.series {
        cfg.plate.series_cells = series;
    }
    if let Some(parallel) = args.parallel {
        cfg.plate.parallel_cells = parallel;
    }
    if args.aligned {
        cfg.plate.slanted = false;
    }
    if let Some(ref cell) = args.cell {
        if standard_cell_diameter(cell).is_none() {
            return Err(format!("unknown cell format '{cell}'"));
        }
        cfg.cell_format = Some(cell.clone());
    }
    if let Some(ref output) = args.output {
        cfg.output.path.clone_from(output);
    }
    cfg.layout_parameters().check()
}

/// Entry point for battery-spacer.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let mut cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = apply_overrides(&mut cfg, &args) {
        eprintln!("Invalid arguments: {e}");
        return ExitCode::FAILURE;
    }

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    let params = cfg.layout_parameters();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        series = params.series_cells,
        parallel = params.parallel_cells,
        slanted = params.slanted,
        "Generating spacer plate"
    );

    let model = PlateModel::build(&params, &cfg.constants);
    info!(
        cells = model.cell_count(),
        balancer_holes = model.balancer_hole_count(),
        width = model.body.width,
        height = model.body.height,
        "Plate laid out"
    );

    let result = if args.layout_json {
        match serde_json::to_string_pretty(&model) {
            Ok(json) => scad::print(&(json + "\n")),
            Err(e) => {
                error!(error = %e, "Failed to serialise layout");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let script = OpenScad::new(cfg.output.scad_options()).render(&model);
        if args.stdout {
            scad::print(&script)
        } else {
            scad::save(&cfg.output.path, &script)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Output failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn log_level_selection() {
        assert_eq!(get_log_level(0, true, "trace"), Level::ERROR);
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "nonsense"), Level::WARN);
        assert_eq!(get_log_level(1, false, "warn"), Level::INFO);
        assert_eq!(get_log_level(5, false, "warn"), Level::TRACE);
    }

    #[test]
    fn overrides_apply() {
        let args = Args::parse_from([
            "battery-spacer",
            "--series",
            "3",
            "--parallel",
            "2",
            "--aligned",
            "--cell",
            "21700",
            "-o",
            "out.scad",
        ]);
        let mut cfg = Config::default();
        apply_overrides(&mut cfg, &args).unwrap();

        let params = cfg.layout_parameters();
        assert_eq!(params.series_cells, 3);
        assert_eq!(params.parallel_cells, 2);
        assert!(!params.slanted);
        assert!((params.cell_diameter - 21.2).abs() < f64::EPSILON);
        assert_eq!(cfg.output.path, PathBuf::from("out.scad"));
    }

    #[test]
    fn overrides_reject_zero_series() {
        let args = Args::parse_from(["battery-spacer", "--series", "0"]);
        let mut cfg = Config::default();
        assert!(apply_overrides(&mut cfg, &args).is_err());
    }

    #[test]
    fn overrides_reject_unknown_cell() {
        let args = Args::parse_from(["battery-spacer", "--cell", "9V"]);
        let mut cfg = Config::default();
        assert!(apply_overrides(&mut cfg, &args).is_err());
    }

    #[test]
    fn layout_json_refuses_output_path() {
        let result = Args::try_parse_from(["battery-spacer", "--layout-json", "-o", "plate.scad"]);
        assert!(result.is_err());

        let args = Args::try_parse_from(["battery-spacer", "--layout-json", "--stdout"])
            .expect("JSON already goes to stdout");
        assert!(args.layout_json);
    }
}
