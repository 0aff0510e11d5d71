use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::stage_label::StageLabel;

/// Row count of one imported stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage: StageLabel,
    pub rows: usize,
}

/// Response of POST /api/u601/import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub board_id: String,
    pub fetched_at: DateTime<Utc>,
    pub stages: Vec<StageSummary>,
}
