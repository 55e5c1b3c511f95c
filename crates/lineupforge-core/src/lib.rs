//! LineupForge Core - data model for lineup optimization
//!
//! This crate provides the fundamental types shared by every stage:
//! - Entrant and pool types with load-time validation
//! - The immutable `Lineup` and its aggregates
//! - Outcome probabilities and their log-space joint aggregation
//! - Combinatorics helpers (binomials, subset enumeration, rounding)

pub mod combinatorics;
pub mod domain;
pub mod error;

pub use combinatorics::{binomial, round_to, subsets, Subsets};
pub use domain::{
    joint_probability, Entrant, EntrantIndex, EntrantPool, Lineup, Members, Outcome,
    OutcomeProbabilities,
};
pub use error::PoolError;

/// Largest lineup size supported; subset enumeration walks `2^K - 1` masks.
pub const MAX_LINEUP_SIZE: usize = 16;
