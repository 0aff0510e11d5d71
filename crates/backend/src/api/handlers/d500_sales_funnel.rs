use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use contracts::dashboards::d500_sales_funnel::{SalesFunnelRequest, SalesFunnelResponse};

use super::{csv_headers, error_response, ApiError};
use crate::dashboards::d500_sales_funnel::service;
use crate::shared::app_state::SharedState;

/// GET /api/d500/sales_funnel?date_from=2024-10-01&date_to=2024-10-25&filter_column=Date%20Created
pub async fn get_sales_funnel(
    State(state): State<SharedState>,
    Query(request): Query<SalesFunnelRequest>,
) -> Result<Json<SalesFunnelResponse>, ApiError> {
    tracing::info!(
        "D500 Dashboard: sales funnel {}..{} by {:?}",
        request.date_from,
        request.date_to,
        request.filter_column
    );

    let response = service::get_sales_funnel(&state, &request)
        .await
        .map_err(|e| error_response("D500 Dashboard", e))?;

    tracing::info!(
        "D500 Dashboard: returning {} rows",
        response.table.rows.len()
    );
    Ok(Json(response))
}

/// GET /api/d500/sales_funnel/csv?date_from=2024-10-01&date_to=2024-10-25
pub async fn get_sales_funnel_csv(
    State(state): State<SharedState>,
    Query(request): Query<SalesFunnelRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let csv = service::get_sales_funnel_csv(&state, &request)
        .await
        .map_err(|e| error_response("D500 Dashboard CSV", e))?;
    let filename = format!("sales_funnel_{}_{}.csv", request.date_from, request.date_to);
    Ok((csv_headers(&filename), csv))
}
