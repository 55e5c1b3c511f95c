use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use lineupforge::config::{ConfigError, OptimizerConfig, ThreadCount};
use lineupforge::{run_optimizer, ForgeError};

/// Configuration read when `--config` is not given and the file exists.
const DEFAULT_CONFIG: &str = "lineupforge.toml";

#[derive(Parser, Debug)]
#[command(name = "lineupforge")]
#[command(about = "Build exposure-capped lineups from a projected entrant pool")]
#[command(version)]
struct Cli {
    /// Configuration file (.toml, .yaml or .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tournament id used to build the input and output file names
    #[arg(short, long)]
    tournament: Option<String>,

    /// Projection version used to build the input file name
    #[arg(short = 'p', long)]
    projection_version: Option<String>,

    /// Entrant file, overriding the configured data source
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Lineup file, overriding the configured output location
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of lineups to write
    #[arg(short = 'm', long)]
    max_lineups: Option<usize>,

    /// Enumeration threads (0 enumerates on the main thread)
    #[arg(long)]
    threads: Option<usize>,

    /// Cap single entrants only, not entrant groups
    #[arg(long)]
    no_recursive_max: bool,

    /// Disable branch-and-bound pruning
    #[arg(long)]
    no_pruning: bool,
}

impl Cli {
    fn load_config(&self) -> Result<OptimizerConfig, ConfigError> {
        match &self.config {
            Some(path) if is_yaml(path) => OptimizerConfig::from_yaml_file(path),
            Some(path) => OptimizerConfig::load(path),
            None if Path::new(DEFAULT_CONFIG).exists() => OptimizerConfig::load(DEFAULT_CONFIG),
            None => Ok(OptimizerConfig::default()),
        }
    }

    /// Layers command-line flags over the file configuration.
    fn apply(self, mut config: OptimizerConfig) -> OptimizerConfig {
        if let Some(tournament) = self.tournament {
            config.source.tournament_id = Some(tournament);
        }
        if let Some(version) = self.projection_version {
            config.source.projection_version = Some(version);
        }
        if let Some(input) = self.input {
            config.source.input = Some(input);
        }
        if let Some(output) = self.output {
            config.output.path = Some(output);
        }
        if let Some(max_lineups) = self.max_lineups {
            config = config.with_max_lineups(max_lineups);
        }
        if let Some(threads) = self.threads {
            let count = match threads {
                0 => ThreadCount::None,
                n => ThreadCount::Count(n),
            };
            config = config.with_thread_count(count);
        }
        if self.no_recursive_max {
            config = config.with_recursive_max(false);
        }
        if self.no_pruning {
            config.enumeration.enable_pruning = false;
        }
        config
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

fn run(cli: Cli) -> Result<(), ForgeError> {
    let config = cli.load_config()?;
    let config = cli.apply(config);
    run_optimizer(&config)?;
    Ok(())
}

fn main() -> ExitCode {
    lineupforge::console::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lineupforge").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "--tournament",
            "401",
            "-p",
            "v2",
            "--max-lineups",
            "20",
            "--threads",
            "4",
            "--no-recursive-max",
            "--no-pruning",
        ]);
        let config = cli.apply(OptimizerConfig::default());

        assert_eq!(config.source.tournament_id.as_deref(), Some("401"));
        assert_eq!(config.source.projection_version.as_deref(), Some("v2"));
        assert_eq!(config.run.max_lineups, 20);
        assert_eq!(config.enumeration.thread_count, ThreadCount::Count(4));
        assert!(!config.run.recursive_max);
        assert!(!config.enumeration.enable_pruning);
    }

    #[test]
    fn test_zero_threads_is_sequential() {
        let config = parse(&["--threads", "0"]).apply(OptimizerConfig::default());
        assert_eq!(config.enumeration.thread_count, ThreadCount::None);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let base = OptimizerConfig::default().with_max_lineups(7);
        let config = parse(&[]).apply(base);
        assert_eq!(config.run.max_lineups, 7);
        assert!(config.run.recursive_max);
        assert!(config.enumeration.enable_pruning);
    }

    #[test]
    fn test_sample_config_parses() {
        let config = OptimizerConfig::from_toml_str(include_str!("../lineupforge.toml")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.pool_filters.len(), 1);
        assert_eq!(config.exposure.overrides.get("Scottie Scheffler"), Some(&0.6));
    }

    #[test]
    fn test_yaml_detection() {
        assert!(is_yaml(Path::new("run.yaml")));
        assert!(is_yaml(Path::new("run.yml")));
        assert!(!is_yaml(Path::new("run.toml")));
    }
}
