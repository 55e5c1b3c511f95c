//! Run entry point that wires loading, both solver stages and output.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use lineupforge_config::OptimizerConfig;
use lineupforge_core::{EntrantPool, Lineup};
use lineupforge_io::{apply_pool_filters, EntrantLoader, LineupRecord, LineupWriter};
use lineupforge_solver::{
    DiversificationStats, DiversifyConfig, EnumerationStats, ExposureDiversifier, ExposureMap,
    LineupConstraints, LineupEnumerator,
};
use tracing::{info, warn};

use crate::error::{ForgeError, Result};

/// Result of both solver stages on an in-memory pool.
#[derive(Debug, Clone)]
pub struct Optimization {
    /// Lineups that passed the enumeration filters.
    pub candidates: usize,
    /// Admitted lineups, best first.
    pub lineups: Vec<Lineup>,
    pub enumeration: EnumerationStats,
    pub diversification: DiversificationStats,
}

/// What a file-to-file run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Entrants in the pool after skipping and filtering.
    pub entrants: usize,
    /// Rows left out while loading.
    pub skipped: usize,
    /// Entrants dropped by pool filters.
    pub filtered: usize,
    pub candidates: usize,
    /// Lineups written.
    pub lineups: usize,
    pub enumeration: EnumerationStats,
    pub diversification: DiversificationStats,
    pub elapsed: Duration,
}

/// Enumerates and diversifies lineups for `pool`.
///
/// Exposure caps come from each entrant's `max_exposure`.
pub fn optimize(pool: &EntrantPool, config: &OptimizerConfig) -> Result<Optimization> {
    config.validate()?;
    if config.run.min_salary > config.run.max_salary {
        warn!(
            event = "empty_salary_band",
            min_salary = config.run.min_salary,
            max_salary = config.run.max_salary,
            "no lineup can satisfy the salary band"
        );
    }

    let enumerator = LineupEnumerator::new(
        LineupConstraints::from_run(&config.run),
        config.enumeration.clone(),
    );
    let enumerated = enumerator.enumerate_with_stats(pool);

    let diversifier = ExposureDiversifier::new(DiversifyConfig::from_run(&config.run));
    let diversified =
        diversifier.diversify_with_stats(&enumerated.lineups, &ExposureMap::from_pool(pool));

    Ok(Optimization {
        candidates: enumerated.lineups.len(),
        lineups: diversified.lineups,
        enumeration: enumerated.stats,
        diversification: diversified.stats,
    })
}

/// Runs the optimizer from the configured entrant file to a lineup file.
///
/// Every input problem is reported before enumeration starts. An infeasible
/// run still writes a file holding only the header.
pub fn run_optimizer(config: &OptimizerConfig) -> Result<RunSummary> {
    let started = Instant::now();
    config.validate()?;

    let input = config.input_path()?;
    info!(
        event = "optimize_start",
        input = %input.display(),
        lineup_size = config.run.lineup_size,
        max_lineups = config.run.max_lineups,
        min_salary = config.run.min_salary,
        max_salary = config.run.max_salary,
    );

    let loaded = EntrantLoader::from_config(&config.source, &config.exposure).load(&input)?;
    let pool = apply_pool_filters(&loaded.pool, &config.pool_filters);
    let filtered = loaded.pool.len() - pool.len();
    info!(
        event = "pool_loaded",
        entrants = pool.len(),
        skipped = loaded.skipped.len(),
        filtered = filtered,
    );

    let optimization = optimize(&pool, config)?;

    let records: Vec<LineupRecord> = optimization
        .lineups
        .iter()
        .map(|lineup| LineupRecord::from_lineup(lineup, &pool))
        .collect();
    let output = config.output_path(records.len())?;
    LineupWriter::new(config.output.delimiter)
        .to_file(&records, config.run.lineup_size, &output)
        .map_err(|source| ForgeError::Write {
            path: output.clone(),
            source,
        })?;

    let elapsed = started.elapsed();
    info!(
        event = "optimize_end",
        lineups = records.len(),
        output = %output.display(),
        duration_ms = elapsed.as_millis() as u64,
    );

    Ok(RunSummary {
        input,
        output,
        entrants: pool.len(),
        skipped: loaded.skipped.len(),
        filtered,
        candidates: optimization.candidates,
        lineups: records.len(),
        enumeration: optimization.enumeration,
        diversification: optimization.diversification,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use lineupforge_config::ConfigError;
    use lineupforge_test::salary_ladder_pool;

    use super::*;

    #[test]
    fn test_optimize_ladder() {
        let config = OptimizerConfig::new()
            .with_lineup_size(2)
            .with_max_lineups(4)
            .with_salary_range(0, 100);
        let optimization = optimize(&salary_ladder_pool(), &config).unwrap();

        assert_eq!(optimization.candidates, 19);
        assert_eq!(optimization.lineups.len(), 4);
        assert_eq!(optimization.lineups[0].members(), &[1, 7]);
        assert_eq!(optimization.diversification.rejected, 0);
    }

    #[test]
    fn test_inverted_band_is_empty_not_error() {
        let config = OptimizerConfig::new()
            .with_lineup_size(2)
            .with_salary_range(200, 100);
        let optimization = optimize(&salary_ladder_pool(), &config).unwrap();
        assert_eq!(optimization.candidates, 0);
        assert!(optimization.lineups.is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = OptimizerConfig::new().with_max_lineups(0);
        let err = optimize(&salary_ladder_pool(), &config).unwrap_err();
        assert!(matches!(err, ForgeError::Config(ConfigError::Invalid(_))));
    }
}
