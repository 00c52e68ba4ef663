use serde::Deserialize;

use crate::dice::WeightedTable;

// --- DTOs (Data Transfer Objects) ---
#[derive(Debug, Deserialize)]
pub struct RollTableRequest {
    pub entries: WeightedTable<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedParams {
    pub seed: Option<u64>,
}
