//! Outcome probabilities and their joint aggregation.

use std::fmt;

/// Lineup-level outcomes reported for each accepted lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    /// Every member finishes in the top 10.
    Top10,
    /// Every member finishes in the top 30.
    Top30,
    /// Every member makes the cut.
    MakeCut,
}

impl Outcome {
    /// All outcomes in output column order.
    pub const ALL: [Outcome; 3] = [Outcome::Top10, Outcome::Top30, Outcome::MakeCut];

    /// Record field name for this outcome.
    pub fn field_name(self) -> &'static str {
        match self {
            Outcome::Top10 => "probability_top_10",
            Outcome::Top30 => "probability_top_30",
            Outcome::MakeCut => "probability_make_cut",
        }
    }

    /// Decimal places used when reporting the joint probability.
    ///
    /// The rare outcomes produce tiny products and keep 9 places; making the
    /// cut is common and keeps 4.
    pub fn decimal_places(self) -> u32 {
        match self {
            Outcome::Top10 | Outcome::Top30 => 9,
            Outcome::MakeCut => 4,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Per-entrant outcome probabilities. Absent values are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeProbabilities {
    pub top_10: Option<f64>,
    pub top_30: Option<f64>,
    pub make_cut: Option<f64>,
}

impl OutcomeProbabilities {
    /// Returns the probability for `outcome`.
    #[inline]
    pub fn get(&self, outcome: Outcome) -> Option<f64> {
        match outcome {
            Outcome::Top10 => self.top_10,
            Outcome::Top30 => self.top_30,
            Outcome::MakeCut => self.make_cut,
        }
    }

    /// Sets the probability for `outcome`.
    pub fn set(&mut self, outcome: Outcome, probability: Option<f64>) {
        match outcome {
            Outcome::Top10 => self.top_10 = probability,
            Outcome::Top30 => self.top_30 = probability,
            Outcome::MakeCut => self.make_cut = probability,
        }
    }
}

/// Multiplies independent probabilities in log space.
///
/// - Any member probability `<= 0` makes the outcome impossible and the
///   result is exactly `Some(0.0)`; `ln 0` is never evaluated.
/// - Otherwise any absent member probability leaves the product undefined
///   and the result is `None`.
/// - Otherwise the result is `exp(Σ ln p)`.
///
/// # Example
///
/// ```
/// use lineupforge_core::joint_probability;
///
/// let p = joint_probability([Some(0.5), Some(0.5)]).unwrap();
/// assert!((p - 0.25).abs() < 1e-12);
///
/// assert_eq!(joint_probability([Some(0.5), Some(0.0)]), Some(0.0));
/// assert_eq!(joint_probability([Some(0.5), None]), None);
/// assert_eq!(joint_probability([None, Some(0.0)]), Some(0.0));
/// ```
pub fn joint_probability<I>(probabilities: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut log_sum = 0.0;
    let mut missing = false;

    for probability in probabilities {
        match probability {
            Some(p) if p <= 0.0 => return Some(0.0),
            Some(p) => log_sum += p.ln(),
            None => missing = true,
        }
    }

    if missing {
        None
    } else {
        Some(log_sum.exp())
    }
}
