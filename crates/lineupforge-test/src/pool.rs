//! Hand-built pools.

use lineupforge_core::{Entrant, EntrantPool};

/// Builds a pool named `entrant-1..=n` from parallel salary and projection
/// slices. Every value is 1.0 and every exposure 1.0.
///
/// # Panics
///
/// Panics if the slices differ in length.
pub fn pool_from_salaries(salaries: &[u32], projections: &[f64]) -> EntrantPool {
    assert_eq!(salaries.len(), projections.len());
    let entrants = salaries
        .iter()
        .zip(projections)
        .enumerate()
        .map(|(i, (&salary, &projection))| {
            Entrant::new(format!("entrant-{}", i + 1), salary, projection, 1.0)
        })
        .collect();
    EntrantPool::new(entrants).expect("fixture pool is valid")
}

/// Eight entrants with salaries 10, 20, .., 80 and projections 1..=8.
///
/// With K=2 and a budget of 100, the best pair by projection
/// (`entrant-7`, `entrant-8`) costs 150 and is excluded. The best survivors
/// sum to 10; the first of them in generation order is
/// (`entrant-2`, `entrant-8`).
pub fn salary_ladder_pool() -> EntrantPool {
    let salaries: Vec<u32> = (1..=8).map(|i| i * 10).collect();
    let projections: Vec<f64> = (1..=8).map(f64::from).collect();
    pool_from_salaries(&salaries, &projections)
}

/// Five entrants of equal salary where `entrant-1` is capped at `cap` and
/// has the highest projection, so it appears in every top-ranked pair.
pub fn exposure_pool(cap: f64) -> EntrantPool {
    let entrants = vec![
        Entrant::new("entrant-1", 10, 50.0, 1.0).with_max_exposure(cap),
        Entrant::new("entrant-2", 10, 40.0, 1.0),
        Entrant::new("entrant-3", 10, 30.0, 1.0),
        Entrant::new("entrant-4", 10, 20.0, 1.0),
        Entrant::new("entrant-5", 10, 10.0, 1.0),
    ];
    EntrantPool::new(entrants).expect("fixture pool is valid")
}
