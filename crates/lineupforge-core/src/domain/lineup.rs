//! Immutable lineup with cached aggregates.

use smallvec::SmallVec;

use super::entrant::EntrantIndex;
use super::pool::EntrantPool;
use super::probability::{joint_probability, Outcome};

/// Member indices of a lineup, ascending. Inline up to 8 members.
pub type Members = SmallVec<[EntrantIndex; 8]>;

/// A combination of distinct entrants with its salary, value and projection
/// totals.
///
/// Members are stored as ascending pool indices, which is also the order in
/// which the combination was generated. Aggregates are summed in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct Lineup {
    members: Members,
    total_salary: u64,
    total_value: f64,
    total_projection: f64,
}

impl Lineup {
    /// Builds a lineup from member indices, computing the aggregates in a
    /// single pass.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range for `pool`.
    pub fn from_members(pool: &EntrantPool, members: &[EntrantIndex]) -> Self {
        let mut sorted: Members = members.iter().copied().collect();
        sorted.sort_unstable();

        let mut total_salary = 0u64;
        let mut total_value = 0.0;
        let mut total_projection = 0.0;
        for &index in &sorted {
            let entrant = &pool[index];
            total_salary += u64::from(entrant.salary);
            total_value += entrant.value;
            total_projection += entrant.projection;
        }

        Self {
            members: sorted,
            total_salary,
            total_value,
            total_projection,
        }
    }

    /// Builds a lineup from members and totals already accumulated by a
    /// caller that walked the members in ascending order.
    pub fn from_parts(
        members: Members,
        total_salary: u64,
        total_value: f64,
        total_projection: f64,
    ) -> Self {
        debug_assert!(members.windows(2).all(|w| w[0] < w[1]));
        Self {
            members,
            total_salary,
            total_value,
            total_projection,
        }
    }

    /// Member indices, ascending.
    #[inline]
    pub fn members(&self) -> &[EntrantIndex] {
        &self.members
    }

    /// Number of members.
    #[inline]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn total_salary(&self) -> u64 {
        self.total_salary
    }

    #[inline]
    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    #[inline]
    pub fn total_projection(&self) -> f64 {
        self.total_projection
    }

    /// Returns true if `index` is a member.
    pub fn contains(&self, index: EntrantIndex) -> bool {
        self.members.binary_search(&index).is_ok()
    }

    /// Member ids in generation order.
    pub fn ids<'a>(&'a self, pool: &'a EntrantPool) -> impl Iterator<Item = &'a str> + 'a {
        self.members.iter().map(move |&i| pool[i].id.as_str())
    }

    /// Joint probability of `outcome` under member independence.
    ///
    /// See [`joint_probability`] for the zero and missing-data rules.
    pub fn joint_probability(&self, pool: &EntrantPool, outcome: Outcome) -> Option<f64> {
        joint_probability(
            self.members
                .iter()
                .map(|&i| pool[i].probabilities.get(outcome)),
        )
    }
}
