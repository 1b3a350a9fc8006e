//! File I/O tests: configuration loading and script output.

use std::fs;

use battery_spacer::config::{load_config, Config};
use battery_spacer::error::ConfigError;
use battery_spacer::model::PlateModel;
use battery_spacer::scad::{self, OpenScad, ScadError, ScriptDialect};
use tempfile::tempdir;

#[test]
fn saved_script_matches_rendered_text() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("battery_spacer.scad");

    let cfg = Config::default();
    let model = PlateModel::build(&cfg.layout_parameters(), &cfg.constants);
    let script = OpenScad::default().render(&model);

    scad::save(&file_path, &script).expect("Failed to write script");
    let written = fs::read_to_string(&file_path).expect("Failed to read script");

    assert_eq!(written, script);
    assert!(written.ends_with("ring();\n"));
}

#[test]
fn save_overwrites_existing_file() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("plate.scad");
    fs::write(&file_path, "stale contents that are longer than the new script")
        .expect("Failed to seed file");

    scad::save(&file_path, "cube(1);\n").expect("Failed to write script");

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "cube(1);\n");
}

#[test]
fn save_into_missing_directory_fails() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("missing").join("plate.scad");

    let err = scad::save(&file_path, "cube(1);\n").unwrap_err();
    match err {
        ScadError::FileWrite { path, .. } => assert_eq!(path, file_path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn config_file_drives_output() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("spacer.json");
    let script_path = temp_dir.path().join("pack.scad");

    let json = format!(
        r#"{{
            "cell_format": "21700",
            "plate": {{ "series_cells": 4, "parallel_cells": 2, "slanted": false }},
            "output": {{ "path": {path}, "hole_segments": 24 }}
        }}"#,
        path = serde_json::to_string(&script_path).unwrap()
    );
    fs::write(&config_path, json).expect("Failed to write config");

    let cfg = load_config(Some(&config_path)).expect("Failed to load config");
    let model = PlateModel::build(&cfg.layout_parameters(), &cfg.constants);
    let script = OpenScad::new(cfg.output.scad_options()).render(&model);
    scad::save(&cfg.output.path, &script).expect("Failed to write script");

    let written = fs::read_to_string(&script_path).expect("Failed to read script");
    assert_eq!(written.matches("cell();").count(), 8);
    // Aligned 4-cell rows: gap 5 lies past the wall, so 4 holes per edge.
    assert_eq!(written.matches("bh();").count(), 8);
    assert!(written.contains("d=21.4,$fn=100"));
    assert!(written.contains("$fn=24"));
}

#[test]
fn config_with_bad_values_is_rejected() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("bad.json");
    fs::write(&config_path, r#"{ "plate": { "parallel_cells": 0 } }"#).unwrap();

    let err = load_config(Some(&config_path)).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
}

#[test]
fn malformed_config_reports_path() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("broken.json");
    fs::write(&config_path, "{ \"plate\": ").unwrap();

    match load_config(Some(&config_path)).unwrap_err() {
        ConfigError::ParseError { path, .. } => assert_eq!(path, config_path),
        other => panic!("unexpected error: {other}"),
    }
}
