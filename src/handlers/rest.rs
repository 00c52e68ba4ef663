use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::instrument;

use crate::{
    data::{RollTableRequest, SeedParams},
    dice::{Die, Rolled, Roller},
    error::AppError,
    state::SharedState,
};

// ==============================================================================
// === REST API Handlers
// =============================================================================

#[instrument(skip(state))]
pub async fn roll_die_handler(
    State(state): State<SharedState>,
    Path(sides): Path<u32>,
    Query(params): Query<SeedParams>,
) -> Result<Json<Rolled<u32>>, AppError> {
    let roller = Roller::new(Die::new(sides)?, state.source.clone());
    let rolled = roller.roll_outcome(params.seed)?;

    tracing::info!(sides, sample = rolled.sample, face = rolled.outcome, "Die rolled");
    Ok(Json(rolled))
}

#[instrument(skip(state, payload))]
pub async fn roll_table_handler(
    State(state): State<SharedState>,
    Json(payload): Json<RollTableRequest>,
) -> Result<Json<Rolled<String>>, AppError> {
    tracing::debug!(outcomes = payload.entries.len(), seed = ?payload.seed, "Rolling table");

    let roller = Roller::new(payload.entries, state.source.clone());
    let rolled = roller.roll_outcome(payload.seed)?;

    tracing::info!(sample = rolled.sample, outcome = %rolled.outcome, "Table rolled");
    Ok(Json(rolled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, LoggingConfig, RngConfig, ServerConfig};
    use crate::dice::{RollError, WeightedTable};
    use crate::state::AppState;
    use std::sync::Arc;

    fn setup_test_state(seed: Option<u64>) -> SharedState {
        let config = Config {
            server: ServerConfig { addr: "0.0.0.0:0".to_string() },
            logging: LoggingConfig { level: "debug".to_string() },
            rng: RngConfig { seed },
        };

        Arc::new(AppState::new(&config))
    }

    fn table_request(seed: Option<u64>) -> RollTableRequest {
        RollTableRequest {
            entries: WeightedTable::new().add("hit".to_string(), 0.25).add("miss".to_string(), 0.75),
            seed,
        }
    }

    #[tokio::test]
    async fn test_roll_die_handler() {
        let state = setup_test_state(None);

        let result = roll_die_handler(State(state), Path(20), Query(SeedParams::default())).await;

        assert!(result.is_ok());
        let Json(rolled) = result.unwrap();
        assert!((1..=20).contains(&rolled.outcome));
        assert!((1..=rolled.max_range).contains(&rolled.sample));
    }

    #[tokio::test]
    async fn test_roll_die_handler_rejects_one_sided_die() {
        let state = setup_test_state(None);

        let result = roll_die_handler(State(state), Path(1), Query(SeedParams::default())).await;

        match result {
            Err(AppError::Roll(RollError::InvalidDie { sides: 1 })) => {}
            other => panic!("Expected InvalidDie, got {:?}", other.map(|Json(r)| r)),
        }
    }

    #[tokio::test]
    async fn test_roll_die_handler_rejects_oversized_die() {
        let state = setup_test_state(None);

        let result = roll_die_handler(State(state), Path(u32::MAX), Query(SeedParams::default())).await;

        assert!(matches!(result, Err(AppError::Roll(RollError::InvalidDie { sides: u32::MAX }))));
    }

    #[tokio::test]
    async fn test_roll_die_handler_seed_is_reproducible() {
        let state = setup_test_state(None);

        let Json(first) =
            roll_die_handler(State(state.clone()), Path(6), Query(SeedParams { seed: Some(42) })).await.unwrap();
        let Json(second) =
            roll_die_handler(State(state), Path(6), Query(SeedParams { seed: Some(42) })).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_roll_table_handler() {
        let state = setup_test_state(Some(7));

        let Json(rolled) = roll_table_handler(State(state), Json(table_request(None))).await.unwrap();

        assert_eq!(rolled.max_range, 100);
        let expected = if rolled.sample <= 25 { "hit" } else { "miss" };
        assert_eq!(rolled.outcome, expected);
    }

    #[tokio::test]
    async fn test_roll_table_handler_rejects_unnormalized_table() {
        let state = setup_test_state(None);
        let payload = RollTableRequest {
            entries: WeightedTable::new().add("a".to_string(), 0.5).add("b".to_string(), 0.6),
            seed: Some(1),
        };

        let result = roll_table_handler(State(state), Json(payload)).await;

        assert!(matches!(result, Err(AppError::Roll(RollError::InvalidDistribution { .. }))));
    }
}
