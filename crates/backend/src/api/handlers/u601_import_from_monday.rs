use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use contracts::usecases::u601_import_from_monday::response::ImportResponse;

use super::{csv_headers, error_response, ApiError};
use crate::shared::app_state::SharedState;
use crate::usecases::u601_import_from_monday::service;

/// POST /api/u601/import
pub async fn import(State(state): State<SharedState>) -> Result<Json<ImportResponse>, ApiError> {
    let response = service::import_board(&state)
        .await
        .map_err(|e| error_response("U601 Import", e))?;

    let rows: usize = response.stages.iter().map(|s| s.rows).sum();
    tracing::info!(
        "U601 Import: board {} fetched, {} rows over {} stages",
        response.board_id,
        rows,
        response.stages.len()
    );
    Ok(Json(response))
}

/// GET /api/u601/stages/:stage/csv
pub async fn get_stage_csv(
    State(state): State<SharedState>,
    Path(stage): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let csv = service::get_stage_csv(&state, &stage)
        .await
        .map_err(|e| error_response("U601 Stage CSV", e))?;
    Ok((csv_headers(&format!("{}.csv", stage)), csv))
}
