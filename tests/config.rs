//! Tests for config persistence and CLI startup options

mod common;

use clap::Parser;
use common::test_model;
use gridpaint::cli::{CliArgs, StartupMode};
use gridpaint::config::AppConfig;
use gridpaint::grid::Color;
use gridpaint::model::AppModel;

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = AppConfig {
        cell_alpha: 0.25,
        max_undo_steps: Some(42),
        default_color: Color::rgb(0x11, 0x22, 0x33),
        device_scale: Some(2.0),
        ..AppConfig::default()
    };
    config.save_to(&path).unwrap();

    assert_eq!(AppConfig::load_from(&path), config);
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        AppConfig::load_from(&dir.path().join("absent.yaml")),
        AppConfig::default()
    );
}

#[test]
fn test_malformed_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "palette: [[[not yaml").unwrap();
    assert_eq!(AppConfig::load_from(&path), AppConfig::default());
}

#[test]
fn test_out_of_range_values_are_repaired() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "cell_alpha: 4.0\nmin_zoom: -1\nmax_undo_steps: 0\npalette: []\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&path);
    assert_eq!(config.cell_alpha, 1.0);
    assert_eq!(config.min_zoom, AppConfig::default().min_zoom);
    assert_eq!(config.max_undo_steps, Some(1));
    assert_eq!(config.palette.len(), 9);
}

#[test]
fn test_config_drives_model() {
    let config = AppConfig {
        default_color: Color::rgb(0, 0, 255),
        device_scale: Some(2.0),
        ..AppConfig::default()
    };
    let mut model = AppModel::new(800, 600, 1.0, config);

    assert_eq!(model.selected_color, Color::rgb(0, 0, 255));
    assert_eq!(model.view.device_scale, 2.0);
    model.set_scale_factor(3.0);
    assert_eq!(model.view.device_scale, 2.0, "pinned scale ignores the window");

    let mut unpinned = test_model();
    unpinned.set_scale_factor(1.5);
    assert_eq!(unpinned.view.device_scale, 1.5);
}

// ============================================================================
// CLI
// ============================================================================

#[test]
fn test_cli_full_grid_defines_at_startup() {
    let args = CliArgs::try_parse_from([
        "gridpaint",
        "scan.png",
        "--top-left",
        "10,20",
        "--bottom-right",
        "310,220",
        "--rows",
        "4",
        "--cols",
        "6",
    ])
    .unwrap();
    let startup = args.into_config().unwrap();

    assert_eq!(startup.mode, StartupMode::Image("scan.png".into()));
    assert!(startup.define_grid);
    assert_eq!(startup.form.parse().unwrap().cols(), 6);
}

#[test]
fn test_cli_partial_grid_only_prefills() {
    let args = CliArgs::try_parse_from(["gridpaint", "--rows", "3"]).unwrap();
    let startup = args.into_config().unwrap();

    assert_eq!(startup.mode, StartupMode::Empty);
    assert!(!startup.define_grid);
    assert_eq!(startup.form.rows, "3");
}

#[test]
fn test_cli_rejects_image_with_project() {
    assert!(CliArgs::try_parse_from(["gridpaint", "a.png", "--project", "b.json"]).is_err());
}

#[test]
fn test_cli_rejects_invalid_full_grid() {
    let args = CliArgs::try_parse_from([
        "gridpaint",
        "--top-left",
        "50,50",
        "--bottom-right",
        "10,10",
        "--rows",
        "2",
        "--cols",
        "2",
    ])
    .unwrap();
    assert!(args.into_config().is_err());
}
