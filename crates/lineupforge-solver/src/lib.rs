//! LineupForge Solver Engine
//!
//! The two algorithmic stages of a run:
//! - [`LineupEnumerator`]: exhaustive, branch-and-bound enumeration of every
//!   budget-feasible K-of-N combination, ranked by projection
//! - [`ExposureDiversifier`]: a single greedy pass that admits ranked lineups
//!   while capping how often any sub-group of entrants recurs
//!
//! Both stages are pure: they take a validated pool and explicit parameters
//! and own all of their working state.

pub mod diversify;
pub mod enumerate;
pub mod stats;

pub use diversify::{
    DiversificationOutcome, DiversifyConfig, ExposureDiversifier, ExposureMap, GroupKey,
    UsageLedger,
};
pub use enumerate::{
    BranchBounder, BudgetBounder, EnumerationOutcome, LineupConstraints, LineupEnumerator,
    NoBounder, SearchNode,
};
pub use stats::{DiversificationStats, EnumerationStats};
