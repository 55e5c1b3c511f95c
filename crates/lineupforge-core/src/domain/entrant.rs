//! Entrant record.

use super::probability::{Outcome, OutcomeProbabilities};

/// Position of an entrant inside its [`EntrantPool`](super::EntrantPool).
///
/// Indices are a stable interning of entrant ids for the lifetime of a pool,
/// so solver internals compare and hash indices instead of strings.
pub type EntrantIndex = usize;

/// A candidate entrant.
///
/// # Example
///
/// ```
/// use lineupforge_core::{Entrant, Outcome};
///
/// let entrant = Entrant::new("scheffler", 11_200, 68.4, 6.1)
///     .with_max_exposure(0.5)
///     .with_probability(Outcome::MakeCut, 0.93);
///
/// assert_eq!(entrant.salary, 11_200);
/// assert_eq!(entrant.probabilities.get(Outcome::MakeCut), Some(0.93));
/// assert_eq!(entrant.probabilities.get(Outcome::Top10), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entrant {
    /// Opaque identifier, unique within a pool.
    pub id: String,
    /// Non-negative cost.
    pub salary: u32,
    /// Expected scoring output; lineups are ranked on its sum.
    pub projection: f64,
    /// Quality score checked against `min_value`.
    pub value: f64,
    /// Maximum fraction of output lineups this entrant may appear in.
    pub max_exposure: f64,
    /// Optional outcome probabilities.
    pub probabilities: OutcomeProbabilities,
}

impl Entrant {
    /// Creates an unconstrained entrant (`max_exposure = 1.0`, no probabilities).
    pub fn new(id: impl Into<String>, salary: u32, projection: f64, value: f64) -> Self {
        Self {
            id: id.into(),
            salary,
            projection,
            value,
            max_exposure: 1.0,
            probabilities: OutcomeProbabilities::default(),
        }
    }

    /// Sets the maximum exposure.
    pub fn with_max_exposure(mut self, max_exposure: f64) -> Self {
        self.max_exposure = max_exposure;
        self
    }

    /// Sets one outcome probability.
    pub fn with_probability(mut self, outcome: Outcome, probability: f64) -> Self {
        self.probabilities.set(outcome, Some(probability));
        self
    }
}
