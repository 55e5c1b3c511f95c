//! File-to-file runs over the sample pool.

use std::fs;
use std::path::Path;

use lineupforge::config::{ExposureMode, OptimizerConfig};
use lineupforge::{run_optimizer, ForgeError};
use lineupforge_io::LoadError;
use lineupforge_test::csv::{entrant_csv, SAMPLE_POOL};

fn config_for(dir: &Path) -> OptimizerConfig {
    let mut config = OptimizerConfig::new().with_max_lineups(2);
    config.source.data_dir = dir.join("customers");
    config.source.tournament_id = Some("401".to_string());
    config.source.projection_version = Some("v1".to_string());
    config.output.dir = dir.join("lineups");
    config
}

fn write_pool(dir: &Path, text: &str) {
    let customers = dir.join("customers");
    fs::create_dir_all(&customers).unwrap();
    fs::write(customers.join("401-v1-draftkings.csv"), text).unwrap();
}

fn first_slots(text: &str) -> Vec<String> {
    text.lines()
        .skip(1)
        .map(|row| row.split(',').next().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_unconstrained_run_writes_top_lineups() {
    let dir = tempfile::tempdir().unwrap();
    write_pool(dir.path(), SAMPLE_POOL);

    let summary = run_optimizer(&config_for(dir.path())).unwrap();

    assert_eq!(summary.entrants, 8);
    assert_eq!(summary.candidates, 4);
    assert_eq!(summary.lineups, 2);
    assert_eq!(summary.output, dir.path().join("lineups").join("401-2.csv"));

    let written = fs::read_to_string(&summary.output).unwrap();
    let rows: Vec<&str> = written.lines().collect();
    assert_eq!(
        rows[0],
        "1,2,3,4,5,6,salary,projection,log_usage,probability_top_10,probability_top_30,probability_make_cut"
    );
    assert!(rows[1].starts_with("Scheffler,Rahm,Schauffele,Morikawa,Fleetwood,Hatton,50000,343.5,0,"));
    assert!(rows[2].starts_with("Scheffler,McIlroy,Schauffele,Morikawa,Lowry,Hatton,50000,"));
}

#[test]
fn test_field_exposure_caps_scheffler() {
    let dir = tempfile::tempdir().unwrap();
    write_pool(dir.path(), SAMPLE_POOL);

    let mut config = config_for(dir.path());
    config.exposure.mode = ExposureMode::Field;
    config.exposure.percent = true;

    // Scheffler is capped at 50% of 2 lineups
    let summary = run_optimizer(&config).unwrap();
    assert_eq!(summary.lineups, 2);
    assert_eq!(summary.diversification.rejected, 2);

    let written = fs::read_to_string(&summary.output).unwrap();
    assert_eq!(first_slots(&written), vec!["Scheffler", "McIlroy"]);
}

#[test]
fn test_infeasible_band_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    write_pool(dir.path(), SAMPLE_POOL);

    let config = config_for(dir.path()).with_salary_range(60_000, 70_000);
    let summary = run_optimizer(&config).unwrap();

    assert_eq!(summary.lineups, 0);
    assert_eq!(summary.output, dir.path().join("lineups").join("401-0.csv"));
    assert_eq!(fs::read_to_string(&summary.output).unwrap().lines().count(), 1);
}

#[test]
fn test_skipped_rows_are_counted() {
    let dir = tempfile::tempdir().unwrap();
    let text = entrant_csv(&[
        "A,5000,40,4,,,,",
        "B,0,40,4,,,,",
        "C,,40,4,,,,",
        "D,5000,30,3,,,,",
        "E,5000,20,2,,,,",
    ]);
    write_pool(dir.path(), &text);

    let config = config_for(dir.path())
        .with_lineup_size(2)
        .with_salary_range(0, 10_000);
    let summary = run_optimizer(&config).unwrap();

    assert_eq!(summary.entrants, 3);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.candidates, 3);
}

#[test]
fn test_missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_optimizer(&config_for(dir.path())).unwrap_err();
    assert!(matches!(err, ForgeError::Load(LoadError::Io { .. })));
    assert!(!dir.path().join("lineups").exists());
}

#[test]
fn test_malformed_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_pool(dir.path(), &entrant_csv(&["A,5000,forty,4,,,,"]));
    let err = run_optimizer(&config_for(dir.path())).unwrap_err();
    assert!(matches!(err, ForgeError::Load(LoadError::NotNumeric { .. })));
}
