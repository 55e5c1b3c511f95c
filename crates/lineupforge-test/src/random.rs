//! Seeded random pools.

use lineupforge_core::{Entrant, EntrantPool, Outcome};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shape of a random pool.
#[derive(Debug, Clone)]
pub struct RandomPoolSpec {
    pub size: usize,
    pub min_salary: u32,
    pub max_salary: u32,
    /// Salaries are multiples of this step.
    pub salary_step: u32,
    /// Projections are drawn from `0..max_projection` and rounded to
    /// one decimal, so ties occur.
    pub max_projection: f64,
    /// Exposures are drawn from `{0.2, 0.4, .., 1.0}` when set.
    pub random_exposure: bool,
    /// Fill all three outcome probabilities.
    pub with_probabilities: bool,
}

impl Default for RandomPoolSpec {
    fn default() -> Self {
        Self {
            size: 14,
            min_salary: 6_000,
            max_salary: 11_000,
            salary_step: 100,
            max_projection: 80.0,
            random_exposure: false,
            with_probabilities: false,
        }
    }
}

/// Generates a reproducible pool from `seed`.
///
/// ```
/// use lineupforge_test::{random_pool, RandomPoolSpec};
///
/// let a = random_pool(7, &RandomPoolSpec::default());
/// let b = random_pool(7, &RandomPoolSpec::default());
/// assert_eq!(a.entrants(), b.entrants());
/// ```
pub fn random_pool(seed: u64, spec: &RandomPoolSpec) -> EntrantPool {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let steps = (spec.max_salary - spec.min_salary) / spec.salary_step.max(1);

    let entrants = (0..spec.size)
        .map(|i| {
            let salary = spec.min_salary + rng.random_range(0..=steps) * spec.salary_step;
            let projection = (rng.random_range(0.0..spec.max_projection) * 10.0).round() / 10.0;
            let value = projection / (f64::from(salary) / 1000.0);

            let mut entrant = Entrant::new(format!("entrant-{}", i + 1), salary, projection, value);
            if spec.random_exposure {
                entrant = entrant.with_max_exposure(f64::from(rng.random_range(1..=5u8)) * 0.2);
            }
            if spec.with_probabilities {
                for outcome in Outcome::ALL {
                    entrant = entrant.with_probability(outcome, rng.random_range(0.0..=1.0));
                }
            }
            entrant
        })
        .collect();

    EntrantPool::new(entrants).expect("generated pool is valid")
}
