//! Tests for optimizer configuration.

use std::path::PathBuf;

use super::*;

#[test]
fn test_defaults_match_classic_golf_run() {
    let config = OptimizerConfig::default();
    assert_eq!(config.run.lineup_size, 6);
    assert_eq!(config.run.max_lineups, 100);
    assert_eq!(config.run.min_salary, 49_900);
    assert_eq!(config.run.max_salary, 50_000);
    assert_eq!(config.run.min_value, 0.0);
    assert!(config.run.recursive_max);
    assert_eq!(config.exposure.mode, ExposureMode::Unconstrained);
    assert_eq!(config.enumeration.thread_count, ThreadCount::Auto);
    assert!(config.enumeration.enable_pruning);
    assert_eq!(config.source.fields.id, "dk_name_id");
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_parsing() {
    let toml = r#"
        [run]
        lineup_size = 5
        max_lineups = 25
        min_salary = 45000
        max_salary = 50000
        min_value = 1.5
        recursive_max = false

        [source]
        input = "data/pool.csv"
        delimiter = ";"

        [source.fields]
        id = "name"

        [enumeration]
        thread_count = { count = 4 }
        enable_pruning = false

        [exposure]
        mode = "field"
        percent = true

        [exposure.overrides]
        "Tiger Woods" = 0.25

        [[pool_filters]]
        field = "probability_make_cut"
        min = 0.4
    "#;

    let config = OptimizerConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.run.lineup_size, 5);
    assert_eq!(config.run.max_lineups, 25);
    assert_eq!(config.run.min_value, 1.5);
    assert!(!config.run.recursive_max);
    assert_eq!(config.source.delimiter, ';');
    assert_eq!(config.source.fields.id, "name");
    // untouched field names keep their defaults
    assert_eq!(config.source.fields.salary, "salary");
    assert_eq!(config.enumeration.thread_count, ThreadCount::Count(4));
    assert!(!config.enumeration.enable_pruning);
    assert_eq!(config.exposure.mode, ExposureMode::Field);
    assert!(config.exposure.percent);
    assert_eq!(config.exposure.overrides.get("Tiger Woods"), Some(&0.25));
    assert_eq!(
        config.pool_filters,
        vec![PoolFilterConfig {
            field: FilterField::ProbabilityMakeCut,
            min: 0.4
        }]
    );
    assert_eq!(config.input_path().unwrap(), PathBuf::from("data/pool.csv"));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        run:
          lineup_size: 6
          max_lineups: 150
        enumeration:
          thread_count: none
        source:
          tournament_id: "401"
          projection_version: "2"
    "#;

    let config = OptimizerConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.run.max_lineups, 150);
    assert_eq!(config.run.max_salary, 50_000);
    assert_eq!(config.enumeration.thread_count, ThreadCount::None);
    assert_eq!(
        config.input_path().unwrap(),
        PathBuf::from("customers/401-2-draftkings.csv")
    );
}

#[test]
fn test_builder() {
    let config = OptimizerConfig::new()
        .with_lineup_size(2)
        .with_max_lineups(5)
        .with_salary_range(0, 100)
        .with_min_value(3.0)
        .with_recursive_max(false)
        .with_thread_count(ThreadCount::Count(2))
        .with_pool_filter(FilterField::Projection, 10.0);

    assert_eq!(config.run.lineup_size, 2);
    assert_eq!(config.run.max_lineups, 5);
    assert_eq!(config.run.min_salary, 0);
    assert_eq!(config.run.max_salary, 100);
    assert_eq!(config.run.min_value, 3.0);
    assert!(!config.run.recursive_max);
    assert_eq!(config.pool_filters.len(), 1);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_lineup_size() {
    let config = OptimizerConfig::new().with_lineup_size(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_oversized_lineup() {
    let config = OptimizerConfig::new().with_lineup_size(MAX_LINEUP_SIZE + 1);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_zero_max_lineups() {
    let config = OptimizerConfig::new().with_max_lineups(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_zero_threads() {
    let config = OptimizerConfig::new().with_thread_count(ThreadCount::Count(0));
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_bad_exposure_override() {
    let mut config = OptimizerConfig::new();
    config.exposure.overrides.insert("a".into(), 1.5);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    config.exposure.overrides.insert("a".into(), 0.0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_non_finite_min_value() {
    let config = OptimizerConfig::new().with_min_value(f64::NAN);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_accepts_inverted_salary_band() {
    // An empty band is infeasible, not invalid.
    let config = OptimizerConfig::new().with_salary_range(50_000, 40_000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_input_path_requires_source() {
    let config = OptimizerConfig::new();
    assert!(matches!(config.input_path(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_output_path_uses_tournament_and_count() {
    let mut config = OptimizerConfig::new();
    config.source.tournament_id = Some("401".into());
    config.source.projection_version = Some("7".into());
    assert_eq!(
        config.output_path(42).unwrap(),
        PathBuf::from("lineups/401-42.csv")
    );

    config.output.extension.clear();
    assert_eq!(config.output_path(3).unwrap(), PathBuf::from("lineups/401-3"));

    config.output.path = Some(PathBuf::from("out.csv"));
    assert_eq!(config.output_path(3).unwrap(), PathBuf::from("out.csv"));
}

#[test]
fn test_output_path_falls_back_to_input_stem() {
    let mut config = OptimizerConfig::new();
    config.source.input = Some(PathBuf::from("data/masters.csv"));
    assert_eq!(
        config.output_path(10).unwrap(),
        PathBuf::from("lineups/masters-10.csv")
    );
}

#[test]
fn test_thread_count_resolve() {
    assert_eq!(ThreadCount::None.resolve(10), 1);
    assert_eq!(ThreadCount::Count(4).resolve(10), 4);
    assert_eq!(ThreadCount::Count(4).resolve(2), 2);
    assert_eq!(ThreadCount::Count(4).resolve(0), 1);
    assert!(ThreadCount::Auto.resolve(1000) >= 1);
}

#[test]
fn test_load_missing_file() {
    let result = OptimizerConfig::load("/nonexistent/path/lineupforge.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_filter_field_names() {
    assert_eq!(FilterField::ProbabilityTop10.field_name(), "probability_top_10");
    assert_eq!(FilterField::Salary.field_name(), "salary");
}
