//! Post-load pool filters.

use lineupforge_config::{FilterField, PoolFilterConfig};
use lineupforge_core::{Entrant, EntrantPool, Outcome};
use tracing::debug;

/// Drops entrants below any configured minimum.
///
/// An entrant without a value for a filtered probability cannot be shown to
/// meet the threshold and is dropped.
///
/// # Example
///
/// ```
/// use lineupforge_config::{FilterField, PoolFilterConfig};
/// use lineupforge_core::{Entrant, EntrantPool};
/// use lineupforge_io::apply_pool_filters;
///
/// let pool = EntrantPool::new(vec![
///     Entrant::new("a", 100, 10.0, 1.0),
///     Entrant::new("b", 100, 30.0, 1.0),
/// ]).unwrap();
/// let filters = [PoolFilterConfig { field: FilterField::Projection, min: 20.0 }];
///
/// let filtered = apply_pool_filters(&pool, &filters);
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0].id, "b");
/// ```
pub fn apply_pool_filters(pool: &EntrantPool, filters: &[PoolFilterConfig]) -> EntrantPool {
    if filters.is_empty() {
        return pool.clone();
    }
    let filtered = pool.filtered(|entrant| {
        filters
            .iter()
            .all(|f| field_value(entrant, f.field).is_some_and(|v| v >= f.min))
    });
    debug!(
        before = pool.len(),
        after = filtered.len(),
        filters = filters.len(),
        "applied pool filters"
    );
    filtered
}

fn field_value(entrant: &Entrant, field: FilterField) -> Option<f64> {
    match field {
        FilterField::Salary => Some(f64::from(entrant.salary)),
        FilterField::Projection => Some(entrant.projection),
        FilterField::Value => Some(entrant.value),
        FilterField::MaxExposure => Some(entrant.max_exposure),
        FilterField::ProbabilityTop10 => entrant.probabilities.get(Outcome::Top10),
        FilterField::ProbabilityTop30 => entrant.probabilities.get(Outcome::Top30),
        FilterField::ProbabilityMakeCut => entrant.probabilities.get(Outcome::MakeCut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> EntrantPool {
        EntrantPool::new(vec![
            Entrant::new("a", 6000, 40.0, 2.0).with_probability(Outcome::Top10, 0.05),
            Entrant::new("b", 9000, 60.0, 4.0).with_probability(Outcome::Top10, 0.2),
            Entrant::new("c", 8000, 55.0, 3.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_no_filters_keeps_everything() {
        assert_eq!(apply_pool_filters(&pool(), &[]).len(), 3);
    }

    #[test]
    fn test_missing_probability_is_dropped() {
        let filters = [PoolFilterConfig {
            field: FilterField::ProbabilityTop10,
            min: 0.1,
        }];
        let filtered = apply_pool_filters(&pool(), &filters);
        let ids: Vec<&str> = filtered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let filters = [
            PoolFilterConfig {
                field: FilterField::Salary,
                min: 7000.0,
            },
            PoolFilterConfig {
                field: FilterField::Value,
                min: 3.5,
            },
        ];
        let filtered = apply_pool_filters(&pool(), &filters);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.index_of("b"), Some(0));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let filters = [PoolFilterConfig {
            field: FilterField::Projection,
            min: 55.0,
        }];
        assert_eq!(apply_pool_filters(&pool(), &filters).len(), 2);
    }
}
