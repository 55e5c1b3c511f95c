//! Search tree node.
//!
//! Each node is a partial combination: the members chosen so far (held by
//! the traversal) plus their running aggregates.

use lineupforge_core::{Entrant, EntrantIndex};

/// A partial combination in the enumeration tree.
///
/// Children of a node pick one more entrant with an index strictly greater
/// than every member already chosen, so each combination is reached exactly
/// once and in lexicographic index order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    /// Members chosen so far (0 = root).
    depth: usize,

    /// Smallest index a child may pick.
    next_index: EntrantIndex,

    /// Accumulated salary.
    salary: u64,

    /// Accumulated value.
    value: f64,

    /// Accumulated projection.
    projection: f64,
}

impl SearchNode {
    /// Creates the root node (empty combination).
    pub fn root() -> Self {
        Self {
            depth: 0,
            next_index: 0,
            salary: 0,
            value: 0.0,
            projection: 0.0,
        }
    }

    /// Creates the child that adds `entrant` at `index`.
    #[inline]
    pub fn child(&self, index: EntrantIndex, entrant: &Entrant) -> Self {
        debug_assert!(index >= self.next_index);
        Self {
            depth: self.depth + 1,
            next_index: index + 1,
            salary: self.salary + u64::from(entrant.salary),
            value: self.value + entrant.value,
            projection: self.projection + entrant.projection,
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn next_index(&self) -> EntrantIndex {
        self.next_index
    }

    #[inline]
    pub fn salary(&self) -> u64 {
        self.salary
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn projection(&self) -> f64 {
        self.projection
    }

    /// Returns true once `lineup_size` members are chosen.
    #[inline]
    pub fn is_leaf(&self, lineup_size: usize) -> bool {
        self.depth >= lineup_size
    }
}
