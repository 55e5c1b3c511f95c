//! Exposure-capped diversification.
//!
//! A single greedy pass over the ranked candidates. A candidate is admitted
//! unless one of its sub-groups has already reached its usage cap; admitting
//! it bumps the usage of every sub-group. There is no backtracking, so the
//! result depends only on the candidate order and the caps.

mod exposure;
mod ledger;


use lineupforge_config::RunConfig;
use lineupforge_core::{subsets, Lineup, Members, MAX_LINEUP_SIZE};
use tracing::{info, trace, warn};

use crate::stats::DiversificationStats;

pub use exposure::ExposureMap;
pub use ledger::{GroupKey, UsageLedger};

/// Diversification parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiversifyConfig {
    /// Maximum lineups to admit (M).
    pub max_lineups: usize,
    /// Cap every sub-group, not only single entrants.
    pub recursive_max: bool,
}

impl DiversifyConfig {
    pub fn new(max_lineups: usize, recursive_max: bool) -> Self {
        Self {
            max_lineups,
            recursive_max,
        }
    }

    pub fn from_run(run: &RunConfig) -> Self {
        Self::new(run.max_lineups, run.recursive_max)
    }
}

/// Admitted lineups together with pass counters.
#[derive(Debug, Clone)]
pub struct DiversificationOutcome {
    pub lineups: Vec<Lineup>,
    pub stats: DiversificationStats,
}

/// Greedy exposure-capped selection.
///
/// A group `g` already in the ledger blocks a candidate once
/// `M * max_usage_per_combo(g) <= usage(g)`.
///
/// # Example
///
/// ```
/// use lineupforge_core::{Entrant, EntrantPool, Lineup};
/// use lineupforge_solver::{DiversifyConfig, ExposureDiversifier, ExposureMap};
///
/// let pool = EntrantPool::new(vec![
///     Entrant::new("a", 1, 9.0, 1.0).with_max_exposure(0.5),
///     Entrant::new("b", 1, 5.0, 1.0),
///     Entrant::new("c", 1, 4.0, 1.0),
/// ]).unwrap();
/// let ranked = vec![
///     Lineup::from_members(&pool, &[0, 1]),
///     Lineup::from_members(&pool, &[0, 2]),
///     Lineup::from_members(&pool, &[1, 2]),
/// ];
///
/// // M = 2, "a" may appear in 2 * 0.5 = 1 lineup
/// let diversifier = ExposureDiversifier::new(DiversifyConfig::new(2, true));
/// let chosen = diversifier.diversify(&ranked, &ExposureMap::from_pool(&pool));
/// assert_eq!(chosen, vec![ranked[0].clone(), ranked[2].clone()]);
/// ```
#[derive(Debug, Clone)]
pub struct ExposureDiversifier {
    config: DiversifyConfig,
}

impl ExposureDiversifier {
    pub fn new(config: DiversifyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DiversifyConfig {
        &self.config
    }

    /// Admits at most `max_lineups` candidates, in candidate order.
    pub fn diversify(&self, candidates: &[Lineup], exposure: &ExposureMap) -> Vec<Lineup> {
        self.diversify_with_stats(candidates, exposure).lineups
    }

    /// Like [`diversify`](Self::diversify), also returning pass counters.
    pub fn diversify_with_stats(
        &self,
        candidates: &[Lineup],
        exposure: &ExposureMap,
    ) -> DiversificationOutcome {
        let max_lineups = self.config.max_lineups;
        let mut stats = DiversificationStats::default();
        stats.start();

        let mut ledger = UsageLedger::new();
        let mut accepted = Vec::with_capacity(max_lineups.min(candidates.len()));
        let mut groups: Vec<Members> = Vec::new();

        for (rank, candidate) in candidates.iter().enumerate() {
            if accepted.len() >= max_lineups {
                break;
            }

            groups.clear();
            if self.config.recursive_max {
                if candidate.size() > MAX_LINEUP_SIZE {
                    warn!(
                        event = "lineup_too_large",
                        rank = rank,
                        size = candidate.size(),
                        max_lineup_size = MAX_LINEUP_SIZE,
                        "sub-group caps cannot be checked, lineup rejected"
                    );
                    stats.record(false);
                    continue;
                }
                groups.extend(subsets(candidate.members(), candidate.size()));
            } else {
                groups.extend(candidate.members().iter().map(|&i| Members::from_slice(&[i])));
            }

            let blocked = groups.iter().any(|group| {
                let key = GroupKey::from_sorted(group.clone());
                ledger.get(&key).is_some_and(|usage| {
                    max_lineups as f64 * exposure.max_usage_per_combo(group) <= f64::from(usage)
                })
            });
            stats.record(!blocked);
            if blocked {
                continue;
            }

            for group in groups.drain(..) {
                ledger.record(GroupKey::from_sorted(group));
            }
            accepted.push(candidate.clone());

            trace!(
                event = "lineup_accepted",
                rank = rank,
                accepted = accepted.len(),
                projection = candidate.total_projection(),
            );
        }

        stats.groups_tracked = ledger.len();
        stats.finish();

        info!(
            event = "diversify_end",
            candidates = candidates.len(),
            considered = stats.considered,
            accepted = stats.accepted,
            rejected = stats.rejected,
            groups = stats.groups_tracked,
            duration_ms = stats.elapsed().as_millis() as u64,
        );

        DiversificationOutcome {
            lineups: accepted,
            stats,
        }
    }
}
