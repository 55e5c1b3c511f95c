//! Tests for domain types (pool validation, lineup aggregates, probabilities).

use super::*;
use crate::PoolError;

fn golfer(id: &str, salary: u32, projection: f64) -> Entrant {
    Entrant::new(id, salary, projection, projection / 10.0)
}

// ============================================================================
// Pool Tests
// ============================================================================

#[test]
fn test_pool_indexes_by_position() {
    let pool = EntrantPool::new(vec![
        golfer("a", 100, 1.0),
        golfer("b", 200, 2.0),
        golfer("c", 300, 3.0),
    ])
    .unwrap();

    assert_eq!(pool.len(), 3);
    assert_eq!(pool.index_of("c"), Some(2));
    assert_eq!(pool.index_of("z"), None);
    assert_eq!(pool[1].id, "b");
}

#[test]
fn test_pool_rejects_empty_id() {
    let err = EntrantPool::new(vec![golfer("a", 1, 1.0), golfer("  ", 1, 1.0)]).unwrap_err();
    assert_eq!(err, PoolError::EmptyId { position: 1 });
}

#[test]
fn test_pool_rejects_non_finite_projection() {
    let err = EntrantPool::new(vec![Entrant::new("a", 1, f64::NAN, 0.0)]).unwrap_err();
    assert!(matches!(err, PoolError::NonFinite { field: "projection", .. }));
}

#[test]
fn test_pool_rejects_exposure_outside_unit_interval() {
    for bad in [0.0, -0.5, 1.01] {
        let err =
            EntrantPool::new(vec![golfer("a", 1, 1.0).with_max_exposure(bad)]).unwrap_err();
        assert!(matches!(err, PoolError::InvalidExposure { .. }), "{bad}");
    }
    assert!(EntrantPool::new(vec![golfer("a", 1, 1.0).with_max_exposure(1.0)]).is_ok());
}

#[test]
fn test_pool_rejects_probability_above_one() {
    let err = EntrantPool::new(vec![golfer("a", 1, 1.0).with_probability(Outcome::Top30, 1.5)])
        .unwrap_err();
    assert!(matches!(
        err,
        PoolError::InvalidProbability {
            field: "probability_top_30",
            ..
        }
    ));
}

#[test]
fn test_pool_filtered_reindexes() {
    let pool = EntrantPool::new(vec![
        golfer("a", 100, 1.0),
        golfer("b", 200, 2.0),
        golfer("c", 300, 3.0),
    ])
    .unwrap();

    let filtered = pool.filtered(|e| e.id != "a");
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered.index_of("b"), Some(0));
    assert_eq!(filtered.index_of("a"), None);
}

// ============================================================================
// Lineup Tests
// ============================================================================

#[test]
fn test_lineup_aggregates() {
    let pool = EntrantPool::new(vec![
        golfer("a", 100, 1.5),
        golfer("b", 200, 2.5),
        golfer("c", 300, 3.0),
    ])
    .unwrap();

    let lineup = Lineup::from_members(&pool, &[2, 0]);
    assert_eq!(lineup.members(), &[0, 2]);
    assert_eq!(lineup.size(), 2);
    assert_eq!(lineup.total_salary(), 400);
    assert!((lineup.total_projection() - 4.5).abs() < 1e-12);
    assert!((lineup.total_value() - 0.45).abs() < 1e-12);
    assert!(lineup.contains(2));
    assert!(!lineup.contains(1));
    assert_eq!(lineup.ids(&pool).collect::<Vec<_>>(), vec!["a", "c"]);
}

#[test]
fn test_lineup_joint_probability() {
    let pool = EntrantPool::new(vec![
        golfer("a", 1, 1.0)
            .with_probability(Outcome::MakeCut, 0.8)
            .with_probability(Outcome::Top10, 0.1),
        golfer("b", 1, 1.0)
            .with_probability(Outcome::MakeCut, 0.5)
            .with_probability(Outcome::Top10, 0.0),
        golfer("c", 1, 1.0).with_probability(Outcome::MakeCut, 0.25),
    ])
    .unwrap();

    let ab = Lineup::from_members(&pool, &[0, 1]);
    let p = ab.joint_probability(&pool, Outcome::MakeCut).unwrap();
    assert!((p - 0.4).abs() < 1e-12);
    // zero member probability: impossible outcome
    assert_eq!(ab.joint_probability(&pool, Outcome::Top10), Some(0.0));
    // nobody has top-30 data: undefined
    assert_eq!(ab.joint_probability(&pool, Outcome::Top30), None);

    let ac = Lineup::from_members(&pool, &[0, 2]);
    // c has no top-10 probability
    assert_eq!(ac.joint_probability(&pool, Outcome::Top10), None);
}

// ============================================================================
// Probability Tests
// ============================================================================

#[test]
fn test_joint_probability_log_space_matches_product() {
    let probs = [0.9, 0.75, 0.6, 0.55, 0.8, 0.7];
    let direct: f64 = probs.iter().product();
    let joint = joint_probability(probs.iter().map(|&p| Some(p))).unwrap();
    assert!((joint - direct).abs() < 1e-12);
}

#[test]
fn test_joint_probability_of_nothing_is_one() {
    assert_eq!(joint_probability(std::iter::empty::<Option<f64>>()), Some(1.0));
}

#[test]
fn test_outcome_metadata() {
    assert_eq!(Outcome::Top10.decimal_places(), 9);
    assert_eq!(Outcome::Top30.decimal_places(), 9);
    assert_eq!(Outcome::MakeCut.decimal_places(), 4);
    assert_eq!(Outcome::MakeCut.to_string(), "probability_make_cut");
}
