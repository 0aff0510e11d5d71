use std::sync::Arc;

use crate::shared::config::Config;
use crate::shared::data::stage_cache::StageCache;
use crate::usecases::u601_import_from_monday::monday_api_client::MondayApiClient;
use crate::usecases::u601_import_from_monday::BoardSource;

/// State shared by all handlers
pub struct AppState {
    pub config: Config,
    pub cache: StageCache,
    /// `None` when no API key is configured; fetches then fail with a clear message
    pub source: Option<Arc<dyn BoardSource>>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config, source: Option<Arc<dyn BoardSource>>) -> Self {
        let cache = StageCache::new(config.cache.ttl_secs);
        Self {
            config,
            cache,
            source,
        }
    }

    /// Wires the monday.com client when an API key is available
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let source: Option<Arc<dyn BoardSource>> = match config.monday.resolve_api_key() {
            Ok(api_key) => Some(Arc::new(MondayApiClient::new(
                &config.monday.api_url,
                api_key,
            )?)),
            Err(e) => {
                tracing::warn!("monday.com fetching disabled: {}", e);
                None
            }
        };
        Ok(Self::new(config, source))
    }
}
