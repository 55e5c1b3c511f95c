//! Branch bounders for enumeration pruning.
//!
//! A bounder decides, from a partial combination and the number of members
//! still to choose, whether any completion could pass the lineup filters.
//! Salaries are non-negative integers and values are summed, so the best and
//! worst completions are found from the cheapest, priciest and most valuable
//! entrants among the remaining indices.

use std::fmt::Debug;

use lineupforge_core::EntrantPool;

use super::node::SearchNode;
use super::LineupConstraints;

/// Decides whether a branch of the search tree can be abandoned.
///
/// Implementations must be conservative: returning `true` for a node that
/// has a completion passing every filter changes the enumeration result.
pub trait BranchBounder: Send + Sync + Debug {
    /// Returns true if no completion of `node` with `remaining` more members
    /// can satisfy the constraints.
    fn can_prune(&self, node: &SearchNode, remaining: usize) -> bool;
}

/// A bounder that never prunes. Every combination reaches the leaf filters.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBounder;

impl BranchBounder for NoBounder {
    #[inline]
    fn can_prune(&self, _node: &SearchNode, _remaining: usize) -> bool {
        false
    }
}

/// Prunes on the salary band and the value floor.
///
/// Precomputes, for every suffix of the pool starting at index `j` and every
/// `r <= K`, the sum of the `r` smallest salaries, the `r` largest salaries
/// and the `r` largest values among indices `>= j`. A node whose accumulated
/// salary plus the cheapest possible completion already exceeds
/// `max_salary`, whose priciest completion stays below `min_salary`, or whose
/// most valuable completion stays below `min_value` is abandoned.
///
/// # Example
///
/// ```
/// use lineupforge_core::{Entrant, EntrantPool};
/// use lineupforge_solver::{BranchBounder, BudgetBounder, LineupConstraints, SearchNode};
///
/// let pool = EntrantPool::new(vec![
///     Entrant::new("a", 60, 1.0, 1.0),
///     Entrant::new("b", 50, 1.0, 1.0),
///     Entrant::new("c", 40, 1.0, 1.0),
/// ]).unwrap();
/// let constraints = LineupConstraints::new(2, 0, 80, 0.0);
/// let bounder = BudgetBounder::new(&pool, &constraints);
///
/// // choosing "a" (60) leaves at best 40 more: 100 > 80
/// let node = SearchNode::root().child(0, &pool[0]);
/// assert!(bounder.can_prune(&node, 1));
/// ```
#[derive(Debug, Clone)]
pub struct BudgetBounder {
    stride: usize,
    min_salary_sums: Vec<u64>,
    max_salary_sums: Vec<u64>,
    max_value_sums: Vec<f64>,
    min_salary: u64,
    max_salary: u64,
    min_value: f64,
    value_slack: f64,
}

impl BudgetBounder {
    /// Builds the suffix tables for `pool`.
    pub fn new(pool: &EntrantPool, constraints: &LineupConstraints) -> Self {
        let k = constraints.lineup_size;
        let n = pool.len();
        let stride = k + 1;

        let mut min_salary_sums = vec![u64::MAX; (n + 1) * stride];
        let mut max_salary_sums = vec![0u64; (n + 1) * stride];
        let mut max_value_sums = vec![f64::NEG_INFINITY; (n + 1) * stride];

        // The k best seen so far while walking the pool backwards.
        let mut cheapest: Vec<u64> = Vec::with_capacity(k + 1);
        let mut priciest: Vec<u64> = Vec::with_capacity(k + 1);
        let mut richest: Vec<f64> = Vec::with_capacity(k + 1);

        for j in (0..=n).rev() {
            if j < n {
                let entrant = &pool[j];
                insert_bounded(&mut cheapest, u64::from(entrant.salary), k, |a, b| a < b);
                insert_bounded(&mut priciest, u64::from(entrant.salary), k, |a, b| a > b);
                insert_bounded(&mut richest, entrant.value, k, |a, b| a > b);
            }

            let row = j * stride;
            min_salary_sums[row] = 0;
            max_salary_sums[row] = 0;
            max_value_sums[row] = 0.0;
            for r in 1..=cheapest.len() {
                min_salary_sums[row + r] = min_salary_sums[row + r - 1] + cheapest[r - 1];
                max_salary_sums[row + r] = max_salary_sums[row + r - 1] + priciest[r - 1];
                max_value_sums[row + r] = max_value_sums[row + r - 1] + richest[r - 1];
            }
        }

        Self {
            stride,
            min_salary_sums,
            max_salary_sums,
            max_value_sums,
            min_salary: constraints.min_salary,
            max_salary: constraints.max_salary,
            min_value: constraints.min_value,
            // Leaf sums add in index order, bounds in sorted order.
            value_slack: 1e-9 * constraints.min_value.abs().max(1.0),
        }
    }

    #[inline]
    fn cell(&self, node: &SearchNode, remaining: usize) -> usize {
        node.next_index() * self.stride + remaining
    }
}

impl BranchBounder for BudgetBounder {
    #[inline]
    fn can_prune(&self, node: &SearchNode, remaining: usize) -> bool {
        let cell = self.cell(node, remaining);

        let cheapest = self.min_salary_sums[cell];
        if cheapest == u64::MAX {
            // fewer than `remaining` entrants left
            return true;
        }
        if node.salary() + cheapest > self.max_salary {
            return true;
        }
        if node.salary() + self.max_salary_sums[cell] < self.min_salary {
            return true;
        }
        node.value() + self.max_value_sums[cell] < self.min_value - self.value_slack
    }
}

/// Inserts `item` into `best` (kept ordered by `better`), retaining at most
/// `limit` elements.
fn insert_bounded<T: Copy>(best: &mut Vec<T>, item: T, limit: usize, better: impl Fn(T, T) -> bool) {
    if limit == 0 {
        return;
    }
    let position = best
        .iter()
        .position(|&existing| better(item, existing))
        .unwrap_or(best.len());
    if position < limit {
        best.insert(position, item);
        best.truncate(limit);
    }
}
