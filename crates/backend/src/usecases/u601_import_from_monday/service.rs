use anyhow::Result;
use chrono::Utc;
use contracts::enums::stage_label::StageLabel;
use contracts::usecases::u601_import_from_monday::response::ImportResponse;

use super::executor;
use crate::dashboards::d500_sales_funnel::FunnelError;
use crate::shared::app_state::AppState;
use crate::shared::config::API_KEY_ENV;
use crate::shared::data::stage_cache::CachedStages;
use crate::shared::table::export::table_to_csv;

/// Stage tables of the configured board: from the cache while fresh, otherwise fetched
/// and cached. `force_refresh` always fetches.
pub async fn load_stages(state: &AppState, force_refresh: bool) -> Result<CachedStages> {
    let board_id = &state.config.monday.board_id;

    if !force_refresh {
        if let Some(hit) = state.cache.get_fresh(board_id, Utc::now()) {
            tracing::debug!("U601: board {} served from cache ({})", board_id, hit.fetched_at);
            return Ok(hit);
        }
    }

    let source = state.source.as_deref().ok_or_else(|| {
        anyhow::anyhow!("{} is not set, cannot fetch board {}", API_KEY_ENV, board_id)
    })?;

    tracing::info!("U601: fetching board {}", board_id);
    let stages =
        executor::execute_import(source, &state.config.monday, &state.config.columns).await?;
    Ok(state.cache.store(board_id, stages, Utc::now()))
}

/// Refetches the board and reports the row count of every stage
pub async fn import_board(state: &AppState) -> Result<ImportResponse> {
    let cached = load_stages(state, true).await?;
    Ok(ImportResponse {
        board_id: state.config.monday.board_id.clone(),
        fetched_at: cached.fetched_at,
        stages: cached.stages.summary(),
    })
}

/// Raw stage table as CSV
pub async fn get_stage_csv(state: &AppState, stage_code: &str) -> Result<String> {
    let stage = StageLabel::from_code(stage_code)
        .ok_or_else(|| FunnelError::UnknownStage(stage_code.to_string()))?;
    let cached = load_stages(state, false).await?;
    table_to_csv(cached.stages.get(stage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u601_import_from_monday::testing::{test_state, InMemoryBoard};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_load_stages_uses_cache_until_forced() {
        let board = Arc::new(InMemoryBoard::sample());
        let state = test_state(Some(board.clone()));

        let first = load_stages(&state, false).await.unwrap();
        let second = load_stages(&state, false).await.unwrap();
        assert_eq!(first.fetched_at, second.fetched_at);
        assert_eq!(board.calls().iter().filter(|c| *c == "groups").count(), 1);

        load_stages(&state, true).await.unwrap();
        assert_eq!(board.calls().iter().filter(|c| *c == "groups").count(), 2);
    }

    #[tokio::test]
    async fn test_import_board_reports_stage_rows() {
        let state = test_state(Some(Arc::new(InMemoryBoard::sample())));
        let response = import_board(&state).await.unwrap();

        assert_eq!(response.board_id, "6942829967");
        assert_eq!(response.stages.len(), 7);
        let rows = |stage: StageLabel| {
            response
                .stages
                .iter()
                .find(|s| s.stage == stage)
                .map(|s| s.rows)
        };
        assert_eq!(rows(StageLabel::Scheduled), Some(5));
        assert_eq!(rows(StageLabel::Won), Some(1));
        assert_eq!(rows(StageLabel::Lost), Some(0));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_reported() {
        let state = test_state(None);
        let err = load_stages(&state, false).await.unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[tokio::test]
    async fn test_stage_csv_uses_column_titles() {
        let state = test_state(Some(Arc::new(InMemoryBoard::sample())));

        let csv = get_stage_csv(&state, "won").await.unwrap();
        assert_eq!(
            csv,
            "Item ID,Item Name,Owner,Deal Value,Date Created\n9,Lead 9,Alice,100,2024-10-05\n"
        );

        let err = get_stage_csv(&state, "archived").await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<FunnelError>(),
            Some(&FunnelError::UnknownStage("archived".into()))
        );
    }
}
