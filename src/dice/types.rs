use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RollError {
    #[error("probabilities are not valid (sum = {sum})")]
    InvalidDistribution { sum: f64 },

    #[error("empty sampling range [{min}, {max}]")]
    EmptyRange { min: u64, max: u64 },

    #[error("a die needs between 2 and {} sides, got {sides}", super::catalog::MAX_SIDES)]
    InvalidDie { sides: u32 },
}

/// One outcome and its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<K> {
    pub outcome: K,
    pub probability: f64,
}

/// Ordered mapping from outcome to probability.
///
/// Iteration follows insertion order, so every scan over the same
/// distribution visits the outcomes in the same sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityDistribution<K> {
    entries: Vec<Entry<K>>,
}

impl<K> ProbabilityDistribution<K> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn with(mut self, outcome: K, probability: f64) -> Self {
        self.push(outcome, probability);
        self
    }

    pub fn push(&mut self, outcome: K, probability: f64) {
        self.entries.push(Entry { outcome, probability });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<K>> {
        self.entries.iter()
    }

    pub fn probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.probability)
    }

    pub fn sum(&self) -> f64 {
        self.probabilities().sum()
    }
}

impl<K> Default for ProbabilityDistribution<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FromIterator<(K, f64)> for ProbabilityDistribution<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(outcome, probability)| Entry { outcome, probability })
                .collect(),
        }
    }
}

impl<K> IntoIterator for ProbabilityDistribution<K> {
    type Item = Entry<K>;
    type IntoIter = std::vec::IntoIter<Entry<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
