use lineupforge_config::{EnumerationConfig, ThreadCount};
use lineupforge_core::{binomial, EntrantPool, Lineup};
use lineupforge_test::{pool_from_salaries, random_pool, salary_ladder_pool, RandomPoolSpec};

use super::*;

fn config(thread_count: ThreadCount, enable_pruning: bool) -> EnumerationConfig {
    EnumerationConfig {
        thread_count,
        enable_pruning,
    }
}

fn sequential() -> EnumerationConfig {
    config(ThreadCount::None, true)
}

fn ids(pool: &EntrantPool, lineup: &Lineup) -> Vec<String> {
    lineup.ids(pool).map(str::to_string).collect()
}

fn members(lineups: &[Lineup]) -> Vec<Vec<usize>> {
    lineups.iter().map(|l| l.members().to_vec()).collect()
}

#[test]
fn test_salary_ladder_excludes_best_pair() {
    let pool = salary_ladder_pool();
    let enumerator = LineupEnumerator::new(LineupConstraints::new(2, 0, 100, 0.0), sequential());
    let lineups = enumerator.enumerate(&pool);

    // pairs (a, b) of 1..=8 with a + b <= 10
    assert_eq!(lineups.len(), 19);
    assert!(lineups.iter().all(|l| !(l.contains(6) && l.contains(7))));

    // best surviving projection is 10, first reached by {2, 8}
    assert_eq!(lineups[0].total_projection(), 10.0);
    assert_eq!(ids(&pool, &lineups[0]), vec!["entrant-2", "entrant-8"]);
    assert_eq!(ids(&pool, &lineups[1]), vec!["entrant-3", "entrant-7"]);
    assert_eq!(ids(&pool, &lineups[2]), vec!["entrant-4", "entrant-6"]);
    assert_eq!(lineups[3].total_projection(), 9.0);
}

#[test]
fn test_unconstrained_enumerates_every_combination() {
    let pool = salary_ladder_pool();
    for k in 1..pool.len() {
        let enumerator =
            LineupEnumerator::new(LineupConstraints::new(k, 0, u64::MAX, f64::MIN), sequential());
        let outcome = enumerator.enumerate_with_stats(&pool);
        assert_eq!(outcome.lineups.len() as u128, binomial(pool.len(), k));
        assert_eq!(outcome.stats.branches_pruned, 0);
    }
}

#[test]
fn test_every_lineup_passes_filters() {
    let pool = random_pool(11, &RandomPoolSpec::default());
    let constraints = LineupConstraints::new(4, 30_000, 34_000, 10.0);
    let lineups = LineupEnumerator::new(constraints, sequential()).enumerate(&pool);

    assert!(!lineups.is_empty());
    for lineup in &lineups {
        assert_eq!(lineup.size(), 4);
        assert!(lineup.total_salary() >= 30_000 && lineup.total_salary() <= 34_000);
        assert!(lineup.total_value() >= 10.0);
        assert_eq!(*lineup, Lineup::from_members(&pool, lineup.members()));
    }
}

#[test]
fn test_ranked_descending_and_stable() {
    // every pair of this pool has projection 2.0
    let pool = pool_from_salaries(&[1, 2, 3, 4], &[1.0, 1.0, 1.0, 1.0]);
    let lineups =
        LineupEnumerator::new(LineupConstraints::new(2, 0, 100, 0.0), sequential()).enumerate(&pool);
    assert_eq!(
        members(&lineups),
        vec![vec![0, 1], vec![0, 2], vec![0, 3], vec![1, 2], vec![1, 3], vec![2, 3]]
    );

    let pool = random_pool(5, &RandomPoolSpec::default());
    let lineups = LineupEnumerator::new(LineupConstraints::new(3, 0, 30_000, 0.0), sequential())
        .enumerate(&pool);
    for pair in lineups.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.total_projection() >= b.total_projection());
        if a.total_projection() == b.total_projection() {
            assert!(a.members() < b.members());
        }
    }
}

#[test]
fn test_filter_order_counters() {
    let pool = pool_from_salaries(&[10, 20, 30], &[1.0, 2.0, 3.0]);
    // pairs cost 30, 40, 50; values are all 2.0
    let enumerator = LineupEnumerator::new(LineupConstraints::new(2, 35, 45, 0.0), config(ThreadCount::None, false));
    let outcome = enumerator.enumerate_with_stats(&pool);

    assert_eq!(members(&outcome.lineups), vec![vec![0, 2]]);
    assert_eq!(outcome.stats.leaves_evaluated, 3);
    assert_eq!(outcome.stats.rejected_over_budget, 1);
    assert_eq!(outcome.stats.rejected_under_budget, 1);
    assert_eq!(outcome.stats.lineups_accepted, 1);

    let enumerator = LineupEnumerator::new(LineupConstraints::new(2, 0, 100, 2.5), config(ThreadCount::None, false));
    let outcome = enumerator.enumerate_with_stats(&pool);
    assert!(outcome.lineups.is_empty());
    assert_eq!(outcome.stats.rejected_low_value, 3);
}

#[test]
fn test_pruning_does_not_change_result() {
    let spec = RandomPoolSpec {
        size: 16,
        ..RandomPoolSpec::default()
    };
    for seed in 0..4 {
        let pool = random_pool(seed, &spec);
        let constraints = LineupConstraints::new(5, 42_000, 45_000, 28.0);

        let pruned = LineupEnumerator::new(constraints, config(ThreadCount::None, true))
            .enumerate_with_stats(&pool);
        let full = LineupEnumerator::new(constraints, config(ThreadCount::None, false))
            .enumerate_with_stats(&pool);

        assert_eq!(pruned.lineups, full.lineups);
        assert!(pruned.stats.nodes_visited <= full.stats.nodes_visited);
    }
}

#[test]
fn test_pruning_cuts_the_tree() {
    let pool = random_pool(1, &RandomPoolSpec { size: 16, ..RandomPoolSpec::default() });
    let constraints = LineupConstraints::new(5, 49_000, 50_000, 0.0);

    let pruned = LineupEnumerator::new(constraints, sequential()).enumerate_with_stats(&pool);
    let full = LineupEnumerator::new(constraints, config(ThreadCount::None, false))
        .enumerate_with_stats(&pool);

    assert!(pruned.stats.branches_pruned > 0);
    assert!(pruned.stats.nodes_visited < full.stats.nodes_visited);
}

#[test]
fn test_sharded_matches_sequential() {
    let pool = random_pool(9, &RandomPoolSpec { size: 15, ..RandomPoolSpec::default() });
    let constraints = LineupConstraints::new(4, 30_000, 36_000, 0.0);

    let sequential = LineupEnumerator::new(constraints, config(ThreadCount::None, true)).enumerate(&pool);
    for threads in [2, 4, 7] {
        let sharded = LineupEnumerator::new(constraints, config(ThreadCount::Count(threads), true))
            .enumerate_with_stats(&pool);
        assert_eq!(sharded.lineups, sequential);
        assert_eq!(sharded.stats.shards, 15 - 4 + 1);
    }
}

#[test]
fn test_trivially_empty_cases() {
    let pool = salary_ladder_pool();
    let empty = |constraints: LineupConstraints| {
        LineupEnumerator::new(constraints, EnumerationConfig::default())
            .enumerate(&pool)
            .is_empty()
    };

    assert!(empty(LineupConstraints::new(0, 0, 1000, 0.0)));
    assert!(empty(LineupConstraints::new(8, 0, 1000, 0.0)));
    assert!(empty(LineupConstraints::new(9, 0, 1000, 0.0)));
    assert!(empty(LineupConstraints::new(2, 101, 100, 0.0)));
    assert!(!empty(LineupConstraints::new(7, 0, 1000, 0.0)));

    let none = EntrantPool::default();
    assert!(LineupEnumerator::new(LineupConstraints::new(1, 0, 10, 0.0), sequential())
        .enumerate(&none)
        .is_empty());
}

#[test]
fn test_lineup_size_above_maximum_is_empty() {
    let pool = pool_from_salaries(&[1; 18], &[1.0; 18]);
    let constraints = LineupConstraints::new(MAX_LINEUP_SIZE + 1, 0, 1000, 0.0);
    assert!(constraints.is_trivially_empty(pool.len()));
    assert!(LineupEnumerator::new(constraints, sequential()).enumerate(&pool).is_empty());

    let at_limit = LineupEnumerator::new(
        LineupConstraints::new(MAX_LINEUP_SIZE, 0, 1000, 0.0),
        sequential(),
    )
    .enumerate(&pool);
    assert_eq!(at_limit.len() as u128, binomial(18, MAX_LINEUP_SIZE));
}

#[test]
fn test_from_run_config() {
    let run = lineupforge_config::RunConfig::default();
    let constraints = LineupConstraints::from_run(&run);
    assert_eq!(constraints.lineup_size, 6);
    assert_eq!(constraints.min_salary, 49_900);
    assert_eq!(constraints.max_salary, 50_000);
}
