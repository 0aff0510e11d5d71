use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::stage_tables::StageTables;

/// Stage tables of one board together with the moment they were fetched
#[derive(Debug, Clone)]
pub struct CachedStages {
    pub fetched_at: DateTime<Utc>,
    pub stages: Arc<StageTables>,
}

/// In-memory cache of fetched boards (keyed by board id), entries expire after `ttl`
pub struct StageCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedStages>>,
}

impl StageCache {
    pub fn new(ttl_secs: u64) -> Self {
        let secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX).min(i64::MAX / 1000);
        Self {
            ttl: Duration::seconds(secs),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached entry for the board if it is younger than the TTL at `now`
    pub fn get_fresh(&self, board_id: &str, now: DateTime<Utc>) -> Option<CachedStages> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(board_id)
            .filter(|entry| now - entry.fetched_at < self.ttl)
            .cloned()
    }

    pub fn store(&self, board_id: &str, stages: StageTables, now: DateTime<Utc>) -> CachedStages {
        let entry = CachedStages {
            fetched_at: now,
            stages: Arc::new(stages),
        };
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(board_id.to_string(), entry.clone());
        entry
    }
}
