//! Validated entrant pool.

use std::collections::HashMap;
use std::ops::Index;

use super::entrant::{Entrant, EntrantIndex};
use super::probability::Outcome;
use crate::error::{PoolError, Result};

/// The validated collection of candidate entrants.
///
/// Construction checks every invariant once, so the solver stages never
/// re-validate: ids are non-empty and unique, numbers are finite,
/// `max_exposure` lies in (0, 1] and probabilities lie in [0, 1].
///
/// # Example
///
/// ```
/// use lineupforge_core::{Entrant, EntrantPool, PoolError};
///
/// let pool = EntrantPool::new(vec![
///     Entrant::new("a", 100, 10.0, 1.0),
///     Entrant::new("b", 200, 20.0, 2.0),
/// ]).unwrap();
/// assert_eq!(pool.len(), 2);
/// assert_eq!(pool.index_of("b"), Some(1));
///
/// let err = EntrantPool::new(vec![
///     Entrant::new("a", 100, 10.0, 1.0),
///     Entrant::new("a", 200, 20.0, 2.0),
/// ]).unwrap_err();
/// assert_eq!(err, PoolError::DuplicateId("a".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntrantPool {
    entrants: Vec<Entrant>,
    index_by_id: HashMap<String, EntrantIndex>,
}

impl EntrantPool {
    /// Validates and indexes the entrants.
    pub fn new(entrants: Vec<Entrant>) -> Result<Self> {
        let mut index_by_id = HashMap::with_capacity(entrants.len());

        for (position, entrant) in entrants.iter().enumerate() {
            validate(position, entrant)?;
            if index_by_id.insert(entrant.id.clone(), position).is_some() {
                return Err(PoolError::DuplicateId(entrant.id.clone()));
            }
        }

        Ok(Self {
            entrants,
            index_by_id,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    /// Returns the entrant at `index`.
    #[inline]
    pub fn get(&self, index: EntrantIndex) -> Option<&Entrant> {
        self.entrants.get(index)
    }

    /// Returns the pool index of `id`.
    pub fn index_of(&self, id: &str) -> Option<EntrantIndex> {
        self.index_by_id.get(id).copied()
    }

    /// All entrants in pool order.
    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entrant> {
        self.entrants.iter()
    }

    /// Returns a new pool holding only the entrants matching `keep`,
    /// preserving their relative order.
    pub fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&Entrant) -> bool,
    {
        let entrants: Vec<Entrant> = self.entrants.iter().filter(|e| keep(e)).cloned().collect();
        let index_by_id = entrants
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id.clone(), i))
            .collect();
        Self {
            entrants,
            index_by_id,
        }
    }

    /// Consumes the pool, returning its entrants.
    pub fn into_entrants(self) -> Vec<Entrant> {
        self.entrants
    }
}

impl Index<EntrantIndex> for EntrantPool {
    type Output = Entrant;

    fn index(&self, index: EntrantIndex) -> &Entrant {
        &self.entrants[index]
    }
}

impl<'a> IntoIterator for &'a EntrantPool {
    type Item = &'a Entrant;
    type IntoIter = std::slice::Iter<'a, Entrant>;

    fn into_iter(self) -> Self::IntoIter {
        self.entrants.iter()
    }
}

fn validate(position: usize, entrant: &Entrant) -> Result<()> {
    if entrant.id.trim().is_empty() {
        return Err(PoolError::EmptyId { position });
    }

    let non_finite = |field: &'static str| PoolError::NonFinite {
        id: entrant.id.clone(),
        field,
    };
    if !entrant.projection.is_finite() {
        return Err(non_finite("projection"));
    }
    if !entrant.value.is_finite() {
        return Err(non_finite("value"));
    }
    if !entrant.max_exposure.is_finite() {
        return Err(non_finite("max_exposure"));
    }

    if entrant.max_exposure <= 0.0 || entrant.max_exposure > 1.0 {
        return Err(PoolError::InvalidExposure {
            id: entrant.id.clone(),
            value: entrant.max_exposure,
        });
    }

    for outcome in Outcome::ALL {
        if let Some(p) = entrant.probabilities.get(outcome) {
            if !p.is_finite() {
                return Err(non_finite(outcome.field_name()));
            }
            if !(0.0..=1.0).contains(&p) {
                return Err(PoolError::InvalidProbability {
                    id: entrant.id.clone(),
                    field: outcome.field_name(),
                    value: p,
                });
            }
        }
    }

    Ok(())
}
