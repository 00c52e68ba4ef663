use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use super::precision::{decimals, range_for, sums_to_one};
use super::source::RandomSource;
use super::types::{ProbabilityDistribution, RollError};

pub type SharedSource = Arc<dyn RandomSource>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rolled<K> {
    pub sample: u64,
    pub max_range: u64,
    pub outcome: K,
}

/// A set of outcomes that can be rolled.
///
/// Implementors only describe their distribution. It is requested again on
/// every validation or roll, so a variant may compute its weights on the fly.
pub trait Outcomes {
    type Outcome: Clone + fmt::Debug;

    fn probabilities(&self) -> ProbabilityDistribution<Self::Outcome>;
}

/// Validates a distribution and draws raw samples for it from a
/// [`RandomSource`].
///
/// A roll returns an integer in `[1, max_range]`. [`Roller::outcome_for`]
/// partitions that range by cumulative probability, each threshold being the
/// running sum scaled by `max_range` and rounded: for `{A: 0.25, B: 0.75}`
/// samples `1..=25` are `A` and `26..=100` are `B`.
pub struct Roller<O> {
    outcomes: O,
    source: SharedSource,
}

impl<O: Outcomes> Roller<O> {
    pub fn new(outcomes: O, source: SharedSource) -> Self {
        Self { outcomes, source }
    }

    // Getters
    pub fn outcomes(&self) -> &O {
        &self.outcomes
    }

    pub fn probabilities(&self) -> ProbabilityDistribution<O::Outcome> {
        self.outcomes.probabilities()
    }

    pub fn random_source(&self) -> &SharedSource {
        &self.source
    }

    pub fn set_random_source(&mut self, source: SharedSource) {
        self.source = source;
    }

    /// True when no probability is negative or non-finite and they sum to one
    /// within ten decimal places.
    pub fn validate(&self) -> bool {
        is_valid(&self.probabilities())
    }

    /// Smallest power of ten that represents every probability without
    /// rounding, at least 10.
    pub fn max_range(&self) -> u64 {
        max_range_of(&self.probabilities())
    }

    #[tracing::instrument(skip(self))]
    pub fn roll(&self, seed: Option<u64>) -> Result<u64, RollError> {
        let distribution = self.probabilities();
        let (sample, _) = self.draw(&distribution, seed)?;
        Ok(sample)
    }

    /// Maps a raw sample back to its outcome. Samples outside
    /// `[1, max_range]` have none.
    pub fn outcome_for(&self, sample: u64) -> Option<O::Outcome> {
        let distribution = self.probabilities();
        let range = max_range_of(&distribution);
        locate(&distribution, range, sample)
    }

    /// Rolls and maps the sample to an outcome.
    pub fn pick(&self, seed: Option<u64>) -> Result<O::Outcome, RollError> {
        self.roll_outcome(seed).map(|rolled| rolled.outcome)
    }

    /// Rolls and maps the sample against a single snapshot of the
    /// distribution, keeping the raw sample alongside the outcome.
    #[tracing::instrument(skip(self))]
    pub fn roll_outcome(&self, seed: Option<u64>) -> Result<Rolled<O::Outcome>, RollError> {
        let distribution = self.probabilities();
        let (sample, max_range) = self.draw(&distribution, seed)?;

        match locate(&distribution, max_range, sample) {
            Some(outcome) => Ok(Rolled { sample, max_range, outcome }),
            None => Err(RollError::InvalidDistribution { sum: distribution.sum() }),
        }
    }

    fn draw(
        &self,
        distribution: &ProbabilityDistribution<O::Outcome>,
        seed: Option<u64>,
    ) -> Result<(u64, u64), RollError> {
        if !is_valid(distribution) {
            let sum = distribution.sum();
            tracing::warn!(sum, outcomes = distribution.len(), "rejecting invalid distribution");
            return Err(RollError::InvalidDistribution { sum });
        }

        let range = max_range_of(distribution);
        let sample = self.source.next(1, range, seed)?;
        tracing::debug!(sample, range, "rolled");
        Ok((sample, range))
    }
}

impl<O: fmt::Debug> fmt::Debug for Roller<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Roller").field("outcomes", &self.outcomes).finish_non_exhaustive()
    }
}

/// Every probability is finite and non-negative, and together they sum to one.
pub fn is_valid<K>(distribution: &ProbabilityDistribution<K>) -> bool {
    distribution.probabilities().all(|p| p.is_finite() && p >= 0.0)
        && sums_to_one(distribution.sum())
}

pub fn max_range_of<K>(distribution: &ProbabilityDistribution<K>) -> u64 {
    let places = distribution.probabilities().map(decimals).fold(1, u32::max);
    range_for(places)
}

fn locate<K: Clone>(distribution: &ProbabilityDistribution<K>, range: u64, sample: u64) -> Option<K> {
    if sample < 1 || sample > range {
        return None;
    }

    let scale = range as f64;
    let mut cumulative = 0.0;
    let mut last = None;
    for entry in distribution.iter() {
        cumulative += entry.probability;
        if entry.probability <= 0.0 {
            continue;
        }

        last = Some(&entry.outcome);
        if sample as f64 <= (cumulative * scale).round() {
            return Some(entry.outcome.clone());
        }
    }

    // Samples above the last threshold come from rounding slack.
    last.cloned()
}
