//! Per-entrant exposure caps.

use lineupforge_core::{EntrantIndex, EntrantPool};

/// Maximum exposure of each entrant, indexed by pool position.
///
/// Entrants beyond the end of the map are unconstrained (1.0).
///
/// # Example
///
/// ```
/// use lineupforge_solver::ExposureMap;
///
/// let mut exposure = ExposureMap::uniform(3, 1.0);
/// exposure.set(0, 0.5);
/// exposure.set(2, 0.4);
///
/// assert_eq!(exposure.get(1), 1.0);
/// assert_eq!(exposure.max_usage_per_combo(&[0, 2]), 0.2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureMap {
    caps: Vec<f64>,
}

impl ExposureMap {
    /// Takes each entrant's `max_exposure`.
    pub fn from_pool(pool: &EntrantPool) -> Self {
        Self {
            caps: pool.iter().map(|e| e.max_exposure).collect(),
        }
    }

    /// Gives `len` entrants the same cap.
    pub fn uniform(len: usize, cap: f64) -> Self {
        Self {
            caps: vec![cap; len],
        }
    }

    /// Sets the cap of one entrant, growing the map as needed.
    pub fn set(&mut self, index: EntrantIndex, cap: f64) {
        if index >= self.caps.len() {
            self.caps.resize(index + 1, 1.0);
        }
        self.caps[index] = cap;
    }

    #[inline]
    pub fn get(&self, index: EntrantIndex) -> f64 {
        self.caps.get(index).copied().unwrap_or(1.0)
    }

    /// Fraction of the output a group may appear in: the product of its
    /// members' caps.
    pub fn max_usage_per_combo(&self, group: &[EntrantIndex]) -> f64 {
        group.iter().map(|&i| self.get(i)).product()
    }

    pub fn len(&self) -> usize {
        self.caps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }
}
