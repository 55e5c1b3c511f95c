//! Lineup enumeration using branch-and-bound.
//!
//! The search tree is keyed by entrant index: the root is the empty
//! combination, each child adds one entrant with an index strictly greater
//! than its parent's members, and leaves sit at depth K. Every K-subset of
//! the pool is therefore reachable exactly once, in lexicographic order.
//!
//! The tree is split into shards by the first member's index. Shards run on
//! a `rayon` pool, are ranked locally and merged back together, which gives
//! the same order as ranking one sequential pass.

mod bounder;
mod node;
mod shard;

#[cfg(test)]
mod tests;

use lineupforge_config::{EnumerationConfig, RunConfig};
use lineupforge_core::{binomial, EntrantPool, Lineup, Members, MAX_LINEUP_SIZE};
use tracing::{debug, info, warn};

use crate::stats::EnumerationStats;

pub use bounder::{BranchBounder, BudgetBounder, NoBounder};
pub use node::SearchNode;

/// Leaf filters applied to every full combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineupConstraints {
    /// Members per lineup (K).
    pub lineup_size: usize,
    /// Inclusive lower salary bound.
    pub min_salary: u64,
    /// Inclusive upper salary bound.
    pub max_salary: u64,
    /// Inclusive lower value bound.
    pub min_value: f64,
}

impl LineupConstraints {
    pub fn new(lineup_size: usize, min_salary: u64, max_salary: u64, min_value: f64) -> Self {
        Self {
            lineup_size,
            min_salary,
            max_salary,
            min_value,
        }
    }

    /// Takes the lineup size, salary band and value floor of a run.
    pub fn from_run(run: &RunConfig) -> Self {
        Self::new(
            run.lineup_size,
            run.min_salary,
            run.max_salary,
            run.min_value,
        )
    }

    /// Returns true if no lineup can satisfy these constraints on a pool of
    /// `pool_size` entrants, without looking at the entrants.
    ///
    /// Lineups larger than [`MAX_LINEUP_SIZE`] are never produced.
    pub fn is_trivially_empty(&self, pool_size: usize) -> bool {
        self.lineup_size == 0
            || self.lineup_size > MAX_LINEUP_SIZE
            || self.lineup_size >= pool_size
            || self.min_salary > self.max_salary
    }

    /// Applies the leaf filters in order: salary ceiling, salary floor, value.
    #[inline]
    fn check_leaf(&self, node: &SearchNode, stats: &mut EnumerationStats) -> bool {
        if node.salary() > self.max_salary {
            stats.record_over_budget();
            false
        } else if node.salary() < self.min_salary {
            stats.record_under_budget();
            false
        } else if node.value() < self.min_value {
            stats.record_low_value();
            false
        } else {
            stats.record_leaf_accepted();
            true
        }
    }
}

/// Ranked lineups together with the counters that produced them.
#[derive(Debug, Clone)]
pub struct EnumerationOutcome {
    pub lineups: Vec<Lineup>,
    pub stats: EnumerationStats,
}

/// Produces every feasible lineup of a pool, ranked by total projection.
///
/// # Example
///
/// ```
/// use lineupforge_config::EnumerationConfig;
/// use lineupforge_core::{Entrant, EntrantPool};
/// use lineupforge_solver::{LineupConstraints, LineupEnumerator};
///
/// let pool = EntrantPool::new(vec![
///     Entrant::new("a", 30, 5.0, 1.0),
///     Entrant::new("b", 40, 9.0, 1.0),
///     Entrant::new("c", 50, 7.0, 1.0),
/// ]).unwrap();
///
/// let enumerator = LineupEnumerator::new(
///     LineupConstraints::new(2, 0, 80, 0.0),
///     EnumerationConfig::default(),
/// );
/// let lineups = enumerator.enumerate(&pool);
///
/// // {b, c} costs 90 and is over budget
/// let ids: Vec<Vec<&str>> = lineups.iter().map(|l| l.ids(&pool).collect()).collect();
/// assert_eq!(ids, vec![vec!["a", "b"], vec!["a", "c"]]);
/// ```
#[derive(Debug, Clone)]
pub struct LineupEnumerator {
    constraints: LineupConstraints,
    config: EnumerationConfig,
}

impl LineupEnumerator {
    pub fn new(constraints: LineupConstraints, config: EnumerationConfig) -> Self {
        Self {
            constraints,
            config,
        }
    }

    pub fn constraints(&self) -> &LineupConstraints {
        &self.constraints
    }

    /// Returns every lineup passing the filters, in descending total
    /// projection, ties in generation order.
    pub fn enumerate(&self, pool: &EntrantPool) -> Vec<Lineup> {
        self.enumerate_with_stats(pool).lineups
    }

    /// Like [`enumerate`](Self::enumerate), also returning search counters.
    pub fn enumerate_with_stats(&self, pool: &EntrantPool) -> EnumerationOutcome {
        let k = self.constraints.lineup_size;
        let n = pool.len();

        let mut stats = EnumerationStats::default();
        stats.start();

        info!(
            event = "enumerate_start",
            entrants = n,
            lineup_size = k,
            combinations = u64::try_from(binomial(n, k)).unwrap_or(u64::MAX),
            min_salary = self.constraints.min_salary,
            max_salary = self.constraints.max_salary,
            pruning = self.config.enable_pruning,
        );

        if k > MAX_LINEUP_SIZE {
            warn!(
                event = "lineup_size_unsupported",
                lineup_size = k,
                max_lineup_size = MAX_LINEUP_SIZE,
                "lineup size above the supported maximum, no lineups enumerated"
            );
        }
        if self.constraints.is_trivially_empty(n) {
            debug!(
                event = "enumerate_skipped",
                entrants = n,
                lineup_size = k,
            );
            stats.finish();
            log_end(&stats, 0);
            return EnumerationOutcome {
                lineups: Vec::new(),
                stats,
            };
        }

        let lineups = if self.config.enable_pruning {
            let bounder = BudgetBounder::new(pool, &self.constraints);
            shard::run(pool, &self.constraints, &bounder, self.config.thread_count, &mut stats)
        } else {
            shard::run(pool, &self.constraints, &NoBounder, self.config.thread_count, &mut stats)
        };

        stats.finish();
        log_end(&stats, lineups.len());

        EnumerationOutcome { lineups, stats }
    }
}

fn log_end(stats: &EnumerationStats, lineup_count: usize) {
    info!(
        event = "enumerate_end",
        lineups = lineup_count,
        nodes = stats.nodes_visited,
        pruned = stats.branches_pruned,
        leaves = stats.leaves_evaluated,
        over_budget = stats.rejected_over_budget,
        under_budget = stats.rejected_under_budget,
        low_value = stats.rejected_low_value,
        duration_ms = stats.elapsed().as_millis() as u64,
        speed = stats.nodes_per_second(),
    );
}

/// Depth-first walk of one shard.
struct Traversal<'a, B: ?Sized> {
    pool: &'a EntrantPool,
    constraints: &'a LineupConstraints,
    bounder: &'a B,
    members: Members,
    found: Vec<Lineup>,
    stats: EnumerationStats,
}

impl<'a, B: BranchBounder + ?Sized> Traversal<'a, B> {
    fn new(pool: &'a EntrantPool, constraints: &'a LineupConstraints, bounder: &'a B) -> Self {
        Self {
            pool,
            constraints,
            bounder,
            members: Members::new(),
            found: Vec::new(),
            stats: EnumerationStats::default(),
        }
    }

    /// Walks the subtree whose first member is `first`.
    fn run_from(mut self, first: usize) -> (Vec<Lineup>, EnumerationStats) {
        let node = SearchNode::root().child(first, &self.pool[first]);
        self.members.push(first);
        self.descend(node);
        (self.found, self.stats)
    }

    fn descend(&mut self, node: SearchNode) {
        self.stats.record_node();

        let k = self.constraints.lineup_size;
        if node.is_leaf(k) {
            if self.constraints.check_leaf(&node, &mut self.stats) {
                self.found.push(Lineup::from_parts(
                    self.members.clone(),
                    node.salary(),
                    node.value(),
                    node.projection(),
                ));
            }
            return;
        }

        let remaining = k - node.depth();
        if self.bounder.can_prune(&node, remaining) {
            self.stats.record_prune();
            return;
        }

        // The last index that still leaves room for the other members.
        let last = self.pool.len() - remaining;
        for index in node.next_index()..=last {
            let child = node.child(index, &self.pool[index]);
            self.members.push(index);
            self.descend(child);
            self.members.pop();
        }
    }
}
