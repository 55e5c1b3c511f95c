//! Sharded enumeration and the k-way merge of ranked shards.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use lineupforge_config::ThreadCount;
use lineupforge_core::{EntrantPool, Lineup};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, warn};

use super::bounder::BranchBounder;
use super::{LineupConstraints, Traversal};
use crate::stats::EnumerationStats;

/// Enumerates every shard, ranks each one and merges them.
///
/// Shard `i` holds the combinations whose smallest member index is `i`.
/// Callers guarantee `0 < K < N`.
pub(super) fn run<B: BranchBounder + ?Sized>(
    pool: &EntrantPool,
    constraints: &LineupConstraints,
    bounder: &B,
    thread_count: ThreadCount,
    stats: &mut EnumerationStats,
) -> Vec<Lineup> {
    let shard_count = pool.len() - constraints.lineup_size + 1;
    let threads = thread_count.resolve(shard_count);
    stats.shards = shard_count;

    let solve_shard = |first: usize| {
        let (mut lineups, shard_stats) = Traversal::new(pool, constraints, bounder).run_from(first);
        rank(&mut lineups);
        debug!(
            event = "shard_end",
            shard = first,
            lineups = lineups.len(),
            nodes = shard_stats.nodes_visited,
            pruned = shard_stats.branches_pruned,
        );
        (lineups, shard_stats)
    };

    let shards: Vec<(Vec<Lineup>, EnumerationStats)> = if threads <= 1 {
        (0..shard_count).map(solve_shard).collect()
    } else {
        match ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(thread_pool) => {
                debug!(event = "shard_pool", threads = threads, shards = shard_count);
                thread_pool.install(|| (0..shard_count).into_par_iter().map(solve_shard).collect())
            }
            Err(err) => {
                warn!(
                    event = "shard_pool_failed",
                    threads = threads,
                    error = %err,
                    "falling back to sequential enumeration"
                );
                (0..shard_count).map(solve_shard).collect()
            }
        }
    };

    let mut ranked = Vec::with_capacity(shards.len());
    for (lineups, shard_stats) in shards {
        stats.merge(&shard_stats);
        ranked.push(lineups);
    }
    merge_ranked(ranked)
}

/// Stable sort by descending total projection.
pub(super) fn rank(lineups: &mut [Lineup]) {
    lineups.sort_by(|a, b| {
        b.total_projection()
            .partial_cmp(&a.total_projection())
            .unwrap_or(Ordering::Equal)
    });
}

/// Head of one shard inside the merge heap.
struct Head {
    projection: f64,
    shard: usize,
    position: usize,
}

impl PartialEq for Head {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Head {}

impl Ord for Head {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: higher projection first, then earlier shard, then
        // earlier position.
        self.projection
            .partial_cmp(&other.projection)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.shard.cmp(&self.shard))
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for Head {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Merges shards that are each ranked, in shard order.
///
/// The result equals a stable ranking of the shards concatenated in order.
pub(super) fn merge_ranked(shards: Vec<Vec<Lineup>>) -> Vec<Lineup> {
    let total: usize = shards.iter().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(total);

    let mut iters: Vec<_> = shards.into_iter().map(|s| s.into_iter().peekable()).collect();
    let mut heap = BinaryHeap::with_capacity(iters.len());
    for (shard, iter) in iters.iter_mut().enumerate() {
        if let Some(first) = iter.peek() {
            heap.push(Head {
                projection: first.total_projection(),
                shard,
                position: 0,
            });
        }
    }

    while let Some(head) = heap.pop() {
        let iter = &mut iters[head.shard];
        if let Some(lineup) = iter.next() {
            merged.push(lineup);
        }
        if let Some(next) = iter.peek() {
            heap.push(Head {
                projection: next.total_projection(),
                shard: head.shard,
                position: head.position + 1,
            });
        }
    }

    merged
}
