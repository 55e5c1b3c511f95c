//! Subset-usage ledger.

use std::collections::HashMap;

use lineupforge_core::{EntrantIndex, Members};

/// Canonical key of an entrant group: member indices ascending, plus the
/// group size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    members: Members,
    size: usize,
}

impl GroupKey {
    /// Builds a key, sorting `members`.
    ///
    /// ```
    /// use lineupforge_solver::GroupKey;
    ///
    /// let a = GroupKey::new([7, 2, 4].into_iter().collect());
    /// let b = GroupKey::new([2, 4, 7].into_iter().collect());
    /// assert_eq!(a, b);
    /// assert_eq!(a.size(), 3);
    /// ```
    pub fn new(mut members: Members) -> Self {
        members.sort_unstable();
        let size = members.len();
        Self { members, size }
    }

    /// Builds a key from members already in ascending order.
    pub(crate) fn from_sorted(members: Members) -> Self {
        debug_assert!(members.windows(2).all(|w| w[0] < w[1]));
        let size = members.len();
        Self { members, size }
    }

    pub fn members(&self) -> &[EntrantIndex] {
        &self.members
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// Number of accepted lineups containing each group seen so far.
///
/// A group is absent until the first lineup containing it is accepted.
#[derive(Debug, Clone, Default)]
pub struct UsageLedger {
    counts: HashMap<GroupKey, u32>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Usage count of `group`, or `None` if it was never recorded.
    pub fn get(&self, group: &GroupKey) -> Option<u32> {
        self.counts.get(group).copied()
    }

    /// Increments the usage of `group`, inserting it at zero first.
    pub fn record(&mut self, group: GroupKey) -> u32 {
        let count = self.counts.entry(group).or_insert(0);
        *count += 1;
        *count
    }

    /// Number of distinct groups.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, u32)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }
}
