use std::fmt;

use serde::{Deserialize, Serialize};

use super::roller::Outcomes;
use super::types::{Entry, ProbabilityDistribution, RollError};

/// Largest die accepted by [`Die::new`]. The distribution holds one entry per
/// face and `sides * (1 / sides)` must still sum to one within tolerance.
pub const MAX_SIDES: u32 = 10_000;

/// A fair die with faces `1..=sides`.
///
/// Serialized as its side count; deserialization goes through [`Die::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Die {
    sides: u32,
}

impl Die {
    pub fn new(sides: u32) -> Result<Self, RollError> {
        if !(2..=MAX_SIDES).contains(&sides) {
            return Err(RollError::InvalidDie { sides });
        }
        Ok(Self { sides })
    }

    pub fn d4() -> Self {
        Self { sides: 4 }
    }

    pub fn d6() -> Self {
        Self { sides: 6 }
    }

    pub fn d8() -> Self {
        Self { sides: 8 }
    }

    pub fn d10() -> Self {
        Self { sides: 10 }
    }

    pub fn d12() -> Self {
        Self { sides: 12 }
    }

    pub fn d20() -> Self {
        Self { sides: 20 }
    }

    pub fn d100() -> Self {
        Self { sides: 100 }
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }
}

impl TryFrom<u32> for Die {
    type Error = RollError;

    fn try_from(sides: u32) -> Result<Self, Self::Error> {
        Self::new(sides)
    }
}

impl From<Die> for u32 {
    fn from(die: Die) -> Self {
        die.sides
    }
}

impl Outcomes for Die {
    type Outcome = u32;

    fn probabilities(&self) -> ProbabilityDistribution<u32> {
        let p = 1.0 / f64::from(self.sides);
        (1..=self.sides).map(|face| (face, p)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoinSide {
    Heads,
    Tails,
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => f.write_str("heads"),
            CoinSide::Tails => f.write_str("tails"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coin;

impl Outcomes for Coin {
    type Outcome = CoinSide;

    fn probabilities(&self) -> ProbabilityDistribution<CoinSide> {
        ProbabilityDistribution::new()
            .with(CoinSide::Heads, 0.5)
            .with(CoinSide::Tails, 0.5)
    }
}

/// Arbitrary outcomes with explicit probabilities.
///
/// The table is not checked on construction; an unnormalized table fails
/// when rolled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightedTable<K> {
    entries: Vec<Entry<K>>,
}

impl<K> WeightedTable<K> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn add(mut self, outcome: K, probability: f64) -> Self {
        self.entries.push(Entry { outcome, probability });
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K> Default for WeightedTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> FromIterator<(K, f64)> for WeightedTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |table, (outcome, probability)| table.add(outcome, probability))
    }
}

impl<K: Clone + fmt::Debug> Outcomes for WeightedTable<K> {
    type Outcome = K;

    fn probabilities(&self) -> ProbabilityDistribution<K> {
        self.entries
            .iter()
            .map(|e| (e.outcome.clone(), e.probability))
            .collect()
    }
}
