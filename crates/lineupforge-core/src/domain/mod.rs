//! Domain model for lineup optimization
//!
//! - `Entrant`: one candidate player with salary, projection and value
//! - `EntrantPool`: the validated, index-addressable set of entrants
//! - `Lineup`: an immutable K-member combination with cached aggregates
//! - `Outcome`: the outcome probabilities aggregated per lineup

mod entrant;
mod lineup;
mod pool;
mod probability;

#[cfg(test)]
mod tests;

pub use entrant::{Entrant, EntrantIndex};
pub use lineup::{Lineup, Members};
pub use pool::EntrantPool;
pub use probability::{joint_probability, Outcome, OutcomeProbabilities};
