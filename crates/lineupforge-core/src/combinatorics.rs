//! Shared numeric and combinatorics helpers.

use crate::domain::{EntrantIndex, Members};

/// Binomial coefficient `C(n, k)`, saturating at `u128::MAX`.
///
/// # Example
///
/// ```
/// use lineupforge_core::binomial;
///
/// assert_eq!(binomial(8, 2), 28);
/// assert_eq!(binomial(156, 6), 18_161_699_556);
/// assert_eq!(binomial(3, 5), 0);
/// ```
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // Exact at every step: result * (n - i) is divisible by (i + 1).
        result = match result.checked_mul((n - i) as u128) {
            Some(r) => r / (i as u128 + 1),
            None => return u128::MAX,
        };
    }
    result
}

/// Rounds `x` to `places` decimal places, half away from zero.
///
/// # Example
///
/// ```
/// use lineupforge_core::round_to;
///
/// assert_eq!(round_to(101.23456, 2), 101.23);
/// assert_eq!(round_to(0.00012345, 4), 0.0001);
/// ```
pub fn round_to(x: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (x * scale).round() / scale
}

/// Iterates the non-empty subsets of `members` holding at most `max_size`
/// elements.
///
/// Subsets keep the relative order of `members`, so an ascending input
/// yields canonical (sorted) groups.
///
/// # Example
///
/// ```
/// use lineupforge_core::subsets;
///
/// let all: Vec<Vec<usize>> = subsets(&[1, 4, 7], 3).map(|s| s.to_vec()).collect();
/// assert_eq!(all.len(), 7);
///
/// let singles: Vec<Vec<usize>> = subsets(&[1, 4, 7], 1).map(|s| s.to_vec()).collect();
/// assert_eq!(singles, vec![vec![1], vec![4], vec![7]]);
/// ```
pub fn subsets(members: &[EntrantIndex], max_size: usize) -> Subsets<'_> {
    assert!(
        members.len() <= crate::MAX_LINEUP_SIZE,
        "subset enumeration supports at most {} members",
        crate::MAX_LINEUP_SIZE
    );
    Subsets {
        members,
        max_size,
        mask: 1,
        end: 1u32 << members.len(),
    }
}

/// Iterator returned by [`subsets`].
#[derive(Debug, Clone)]
pub struct Subsets<'a> {
    members: &'a [EntrantIndex],
    max_size: usize,
    mask: u32,
    end: u32,
}

impl Iterator for Subsets<'_> {
    type Item = Members;

    fn next(&mut self) -> Option<Members> {
        while self.mask < self.end {
            let mask = self.mask;
            self.mask += 1;
            if mask.count_ones() as usize > self.max_size {
                continue;
            }
            return Some(
                self.members
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| mask & (1 << bit) != 0)
                    .map(|(_, &index)| index)
                    .collect(),
            );
        }
        None
    }
}
