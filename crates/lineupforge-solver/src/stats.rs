//! Stage statistics.
//!
//! Plain counters filled in by the enumerator and diversifier. Shards keep
//! their own [`EnumerationStats`] and are folded together with
//! [`EnumerationStats::merge`].

use std::time::{Duration, Instant};

/// Enumeration counters.
///
/// # Example
///
/// ```
/// use lineupforge_solver::stats::EnumerationStats;
///
/// let mut a = EnumerationStats::default();
/// a.record_node();
/// a.record_leaf_accepted();
///
/// let mut b = EnumerationStats::default();
/// b.record_node();
/// b.record_prune();
///
/// a.merge(&b);
/// assert_eq!(a.nodes_visited, 2);
/// assert_eq!(a.branches_pruned, 1);
/// assert_eq!(a.lineups_accepted, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumerationStats {
    start_time: Option<Instant>,
    elapsed: Duration,
    /// Shards the search tree was split into.
    pub shards: usize,
    /// Interior and leaf nodes entered.
    pub nodes_visited: u64,
    /// Subtrees abandoned by the bounder.
    pub branches_pruned: u64,
    /// Full combinations that reached the filters.
    pub leaves_evaluated: u64,
    /// Rejected for total salary above the band.
    pub rejected_over_budget: u64,
    /// Rejected for total salary below the band.
    pub rejected_under_budget: u64,
    /// Rejected for total value below the floor.
    pub rejected_low_value: u64,
    /// Combinations that passed every filter.
    pub lineups_accepted: u64,
}

impl EnumerationStats {
    /// Marks the start of enumeration.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed = start.elapsed();
        }
    }

    /// Time between [`start`](Self::start) and [`finish`](Self::finish), or
    /// the running time if not yet finished.
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(self.elapsed)
    }

    #[inline]
    pub fn record_node(&mut self) {
        self.nodes_visited += 1;
    }

    #[inline]
    pub fn record_prune(&mut self) {
        self.branches_pruned += 1;
    }

    #[inline]
    pub fn record_over_budget(&mut self) {
        self.leaves_evaluated += 1;
        self.rejected_over_budget += 1;
    }

    #[inline]
    pub fn record_under_budget(&mut self) {
        self.leaves_evaluated += 1;
        self.rejected_under_budget += 1;
    }

    #[inline]
    pub fn record_low_value(&mut self) {
        self.leaves_evaluated += 1;
        self.rejected_low_value += 1;
    }

    #[inline]
    pub fn record_leaf_accepted(&mut self) {
        self.leaves_evaluated += 1;
        self.lineups_accepted += 1;
    }

    /// Adds another shard's counters into this one. Timing is left alone.
    pub fn merge(&mut self, other: &EnumerationStats) {
        self.nodes_visited += other.nodes_visited;
        self.branches_pruned += other.branches_pruned;
        self.leaves_evaluated += other.leaves_evaluated;
        self.rejected_over_budget += other.rejected_over_budget;
        self.rejected_under_budget += other.rejected_under_budget;
        self.rejected_low_value += other.rejected_low_value;
        self.lineups_accepted += other.lineups_accepted;
    }

    /// Nodes visited per second.
    pub fn nodes_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.nodes_visited as f64 / secs) as u64
        } else {
            0
        }
    }
}

/// Diversification counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiversificationStats {
    start_time: Option<Instant>,
    elapsed: Duration,
    /// Ranked lineups examined before stopping.
    pub considered: u64,
    /// Lineups admitted.
    pub accepted: u64,
    /// Lineups rejected by an exposure cap, or too large to check sub-groups.
    pub rejected: u64,
    /// Distinct groups in the usage ledger at the end of the pass.
    pub groups_tracked: usize,
}

impl DiversificationStats {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn finish(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed = start.elapsed();
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(self.elapsed)
    }

    /// Records one examined lineup.
    #[inline]
    pub fn record(&mut self, accepted: bool) {
        self.considered += 1;
        if accepted {
            self.accepted += 1;
        } else {
            self.rejected += 1;
        }
    }

    /// Fraction of examined lineups that were admitted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.considered == 0 {
            0.0
        } else {
            self.accepted as f64 / self.considered as f64
        }
    }
}
