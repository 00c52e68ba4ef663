use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::types::RollError;

/// Uniform integer source consumed by a [`Roller`](super::Roller).
///
/// `next` returns a value in the inclusive range `[min, max]`. When `seed` is
/// given, the same `(min, max, seed)` always yields the same value; without
/// it the source draws from its own entropy or stream.
pub trait RandomSource: Send + Sync {
    fn next(&self, min: u64, max: u64, seed: Option<u64>) -> Result<u64, RollError>;
}

fn check_range(min: u64, max: u64) -> Result<(), RollError> {
    if min > max {
        return Err(RollError::EmptyRange { min, max });
    }
    Ok(())
}

fn seeded(min: u64, max: u64, seed: u64) -> u64 {
    StdRng::seed_from_u64(seed).random_range(min..=max)
}

/// Ambient entropy from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl ThreadRngSource {
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRngSource {
    fn next(&self, min: u64, max: u64, seed: Option<u64>) -> Result<u64, RollError> {
        check_range(min, max)?;
        Ok(match seed {
            Some(seed) => seeded(min, max, seed),
            None => rand::rng().random_range(min..=max),
        })
    }
}

/// A single `StdRng` stream shared behind a mutex.
///
/// Built with [`StdRngSource::from_seed`], the sequence of unseeded draws is
/// reproducible across runs.
#[derive(Debug)]
pub struct StdRngSource {
    rng: Mutex<StdRng>,
}

impl StdRngSource {
    pub fn new() -> Self {
        Self { rng: Mutex::new(StdRng::from_os_rng()) }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl Default for StdRngSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRngSource {
    fn next(&self, min: u64, max: u64, seed: Option<u64>) -> Result<u64, RollError> {
        check_range(min, max)?;
        if let Some(seed) = seed {
            return Ok(seeded(min, max, seed));
        }

        // Poisoning leaves the generator state intact.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(rng.random_range(min..=max))
    }
}

/// Cycles through a fixed sequence of values, clamped to the requested range.
/// Seeds are ignored.
#[derive(Debug)]
pub struct FixedSource {
    values: Vec<u64>,
    index: AtomicUsize,
    calls: AtomicUsize,
}

impl FixedSource {
    pub fn new(values: Vec<u64>) -> Self {
        Self { values, index: AtomicUsize::new(0), calls: AtomicUsize::new(0) }
    }

    pub fn constant(value: u64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RandomSource for FixedSource {
    fn next(&self, min: u64, max: u64, _seed: Option<u64>) -> Result<u64, RollError> {
        check_range(min, max)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.values.is_empty() {
            return Ok(min);
        }

        let idx = self.index.fetch_add(1, Ordering::SeqCst);
        Ok(self.values[idx % self.values.len()].clamp(min, max))
    }
}
