use std::sync::Arc;

use crate::config::Config;
use crate::dice::{SharedSource, StdRngSource, ThreadRngSource};

pub struct AppState {
    pub source: SharedSource,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let source: SharedSource = match config.rng.seed {
            Some(seed) => {
                tracing::info!(seed, "Using seeded random stream");
                Arc::new(StdRngSource::from_seed(seed))
            }
            None => Arc::new(ThreadRngSource::new()),
        };

        Self { source }
    }
}

pub type SharedState = Arc<AppState>;
