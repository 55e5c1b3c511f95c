//! Configuration system for LineupForge.
//!
//! Load run parameters from TOML (or YAML) files so budgets, exposure
//! handling and data sources change without code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use lineupforge_config::OptimizerConfig;
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     [run]
//!     lineup_size = 6
//!     max_lineups = 20
//!     min_salary = 49000
//!     max_salary = 50000
//!
//!     [source]
//!     tournament_id = "401353232"
//!     projection_version = "v3"
//! "#).unwrap();
//!
//! assert_eq!(config.run.max_lineups, 20);
//! assert!(config.run.recursive_max);
//! assert_eq!(
//!     config.input_path().unwrap().to_str(),
//!     Some("customers/401353232-v3-draftkings.csv")
//! );
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use lineupforge_config::OptimizerConfig;
//!
//! let config = OptimizerConfig::load("lineupforge.toml").unwrap_or_default();
//! assert_eq!(config.run.lineup_size, 6);
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lineupforge_core::MAX_LINEUP_SIZE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main optimizer configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// Lineup shape, budget band and diversification cap.
    #[serde(default)]
    pub run: RunConfig,

    /// Where the entrant pool is read from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Where the selected lineups are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Enumeration strategy.
    #[serde(default)]
    pub enumeration: EnumerationConfig,

    /// How per-entrant exposure caps are obtained.
    #[serde(default)]
    pub exposure: ExposureConfig,

    /// Minimum thresholds applied to the pool after loading.
    #[serde(default)]
    pub pool_filters: Vec<PoolFilterConfig>,
}

impl OptimizerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the lineup size.
    pub fn with_lineup_size(mut self, lineup_size: usize) -> Self {
        self.run.lineup_size = lineup_size;
        self
    }

    /// Sets the maximum number of output lineups.
    pub fn with_max_lineups(mut self, max_lineups: usize) -> Self {
        self.run.max_lineups = max_lineups;
        self
    }

    /// Sets the salary band.
    pub fn with_salary_range(mut self, min_salary: u64, max_salary: u64) -> Self {
        self.run.min_salary = min_salary;
        self.run.max_salary = max_salary;
        self
    }

    /// Sets the minimum total lineup value.
    pub fn with_min_value(mut self, min_value: f64) -> Self {
        self.run.min_value = min_value;
        self
    }

    /// Enables or disables recursive sub-group exposure caps.
    pub fn with_recursive_max(mut self, recursive_max: bool) -> Self {
        self.run.recursive_max = recursive_max;
        self
    }

    /// Sets the enumeration thread count.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.enumeration.thread_count = thread_count;
        self
    }

    /// Adds a pool filter.
    pub fn with_pool_filter(mut self, field: FilterField, min: f64) -> Self {
        self.pool_filters.push(PoolFilterConfig { field, min });
        self
    }

    /// Checks every parameter that would otherwise fail mid-run.
    ///
    /// An empty salary band (`min_salary > max_salary`) is not an error: it
    /// describes an infeasible run that produces no lineups.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let run = &self.run;
        if run.lineup_size == 0 {
            return Err(ConfigError::Invalid("lineup_size must be positive".into()));
        }
        if run.lineup_size > MAX_LINEUP_SIZE {
            return Err(ConfigError::Invalid(format!(
                "lineup_size {} exceeds the supported maximum of {}",
                run.lineup_size, MAX_LINEUP_SIZE
            )));
        }
        if run.max_lineups == 0 {
            return Err(ConfigError::Invalid("max_lineups must be positive".into()));
        }
        if !run.min_value.is_finite() {
            return Err(ConfigError::Invalid("min_value must be finite".into()));
        }
        if let ThreadCount::Count(0) = self.enumeration.thread_count {
            return Err(ConfigError::Invalid(
                "enumeration.thread_count must be at least 1".into(),
            ));
        }
        for (id, &cap) in &self.exposure.overrides {
            if !(cap > 0.0 && cap <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "exposure override for {id} is {cap}, expected a value in (0, 1]"
                )));
            }
        }
        for filter in &self.pool_filters {
            if !filter.min.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "pool filter on {} has a non-finite minimum",
                    filter.field.field_name()
                )));
            }
        }
        for delimiter in [self.source.delimiter, self.output.delimiter] {
            if matches!(delimiter, '"' | '\n' | '\r') {
                return Err(ConfigError::Invalid(format!(
                    "{delimiter:?} cannot be used as a delimiter"
                )));
            }
        }
        Ok(())
    }

    /// Resolves the entrant pool path.
    ///
    /// An explicit `source.input` wins; otherwise the path is built as
    /// `{data_dir}/{tournament_id}-{projection_version}-{site}.{extension}`.
    pub fn input_path(&self) -> Result<PathBuf, ConfigError> {
        let source = &self.source;
        if let Some(input) = &source.input {
            return Ok(input.clone());
        }
        let (Some(tournament), Some(version)) =
            (&source.tournament_id, &source.projection_version)
        else {
            return Err(ConfigError::Invalid(
                "source needs either `input` or both `tournament_id` and `projection_version`"
                    .into(),
            ));
        };
        let stem = format!("{tournament}-{version}-{}", source.site);
        Ok(with_extension(source.data_dir.join(stem), &source.extension))
    }

    /// Resolves the lineup output path for a run that selected `count`
    /// lineups.
    ///
    /// An explicit `output.path` wins; otherwise the path is
    /// `{output.dir}/{tournament_id}-{count}.{extension}`, falling back to the
    /// input file stem when no tournament id is configured.
    pub fn output_path(&self, count: usize) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.output.path {
            return Ok(path.clone());
        }
        let prefix = match &self.source.tournament_id {
            Some(tournament) => tournament.clone(),
            None => self
                .input_path()?
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "lineups".to_string()),
        };
        let stem = format!("{prefix}-{count}");
        Ok(with_extension(self.output.dir.join(stem), &self.output.extension))
    }
}

fn with_extension(path: PathBuf, extension: &str) -> PathBuf {
    if extension.is_empty() {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }
}

/// Lineup shape, budget and diversification parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct RunConfig {
    /// Members per lineup (K).
    pub lineup_size: usize,

    /// Maximum number of output lineups (M).
    pub max_lineups: usize,

    /// Lowest total salary kept (inclusive).
    pub min_salary: u64,

    /// Highest total salary kept (inclusive).
    pub max_salary: u64,

    /// Lowest total value kept (inclusive).
    pub min_value: f64,

    /// Cap every sub-group of a lineup, not only single entrants.
    pub recursive_max: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            lineup_size: 6,
            max_lineups: 100,
            min_salary: 49_900,
            max_salary: 50_000,
            min_value: 0.0,
            recursive_max: true,
        }
    }
}

/// Entrant pool source.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SourceConfig {
    /// Explicit input file; overrides the tournament-based template.
    pub input: Option<PathBuf>,

    /// Directory holding projection files.
    pub data_dir: PathBuf,

    /// Tournament identifier.
    pub tournament_id: Option<String>,

    /// Projection version.
    pub projection_version: Option<String>,

    /// Contest site suffix.
    pub site: String,

    /// File extension, empty for none.
    pub extension: String,

    /// Field delimiter.
    pub delimiter: char,

    /// Column names.
    pub fields: FieldNames,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            input: None,
            data_dir: PathBuf::from("customers"),
            tournament_id: None,
            projection_version: None,
            site: "draftkings".to_string(),
            extension: "csv".to_string(),
            delimiter: ',',
            fields: FieldNames::default(),
        }
    }
}

/// Column names in the entrant file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FieldNames {
    pub id: String,
    pub salary: String,
    pub projection: String,
    pub value: String,
    pub max_exposure: String,
    pub probability_top_10: String,
    pub probability_top_30: String,
    pub probability_make_cut: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            id: "dk_name_id".to_string(),
            salary: "salary".to_string(),
            projection: "projection".to_string(),
            value: "value".to_string(),
            max_exposure: "max_exposure".to_string(),
            probability_top_10: "probability_top_10".to_string(),
            probability_top_30: "probability_top_30".to_string(),
            probability_make_cut: "probability_make_cut".to_string(),
        }
    }
}

/// Lineup output destination.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct OutputConfig {
    /// Explicit output file; overrides the tournament-based template.
    pub path: Option<PathBuf>,

    /// Directory receiving lineup files.
    pub dir: PathBuf,

    /// File extension, empty for none.
    pub extension: String,

    /// Field delimiter.
    pub delimiter: char,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            dir: PathBuf::from("lineups"),
            extension: "csv".to_string(),
            delimiter: ',',
        }
    }
}

/// Enumeration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EnumerationConfig {
    /// Worker threads for sharded enumeration.
    pub thread_count: ThreadCount,

    /// Prune branches whose salary or value can no longer satisfy the band.
    pub enable_pruning: bool,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            thread_count: ThreadCount::Auto,
            enable_pruning: true,
        }
    }
}

/// Enumeration thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// One thread per available core.
    #[default]
    Auto,

    /// Sequential enumeration on the calling thread.
    None,

    /// Specific number of threads.
    Count(usize),
}

impl ThreadCount {
    /// Resolves the thread count to an actual number.
    ///
    /// # Arguments
    ///
    /// * `shard_count` - Number of independent shards to process
    pub fn resolve(&self, shard_count: usize) -> usize {
        let wanted = match self {
            ThreadCount::Auto => std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1),
            ThreadCount::None => 1,
            ThreadCount::Count(n) => *n,
        };
        wanted.min(shard_count).max(1)
    }
}

/// Where exposure caps come from.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ExposureConfig {
    /// Exposure source.
    pub mode: ExposureMode,

    /// The exposure column is expressed in percent (0..=100).
    pub percent: bool,

    /// Per-entrant caps applied on top of the source, keyed by id.
    pub overrides: BTreeMap<String, f64>,
}

/// Exposure source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposureMode {
    /// Every entrant may appear in every lineup.
    #[default]
    Unconstrained,

    /// Read caps from the configured exposure column.
    Field,
}

/// A minimum threshold on one entrant field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PoolFilterConfig {
    /// Field compared.
    pub field: FilterField,

    /// Entrants strictly below this are dropped.
    pub min: f64,
}

/// Numeric entrant field usable in a pool filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum FilterField {
    #[serde(rename = "salary")]
    Salary,
    #[serde(rename = "projection")]
    Projection,
    #[serde(rename = "value")]
    Value,
    #[serde(rename = "max_exposure")]
    MaxExposure,
    #[serde(rename = "probability_top_10")]
    ProbabilityTop10,
    #[serde(rename = "probability_top_30")]
    ProbabilityTop30,
    #[serde(rename = "probability_make_cut")]
    ProbabilityMakeCut,
}

impl FilterField {
    /// Canonical field name.
    pub fn field_name(self) -> &'static str {
        match self {
            FilterField::Salary => "salary",
            FilterField::Projection => "projection",
            FilterField::Value => "value",
            FilterField::MaxExposure => "max_exposure",
            FilterField::ProbabilityTop10 => "probability_top_10",
            FilterField::ProbabilityTop30 => "probability_top_30",
            FilterField::ProbabilityMakeCut => "probability_make_cut",
        }
    }
}
