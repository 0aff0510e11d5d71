use anyhow::Result;
use contracts::dashboards::d500_sales_funnel::{SalesFunnelRequest, SalesFunnelResponse};
use contracts::enums::date_filter_column::DateFilterColumn;

use super::{engine, FunnelError};
use crate::shared::app_state::AppState;
use crate::shared::table::export::metrics_to_csv;
use crate::usecases::u601_import_from_monday::service::load_stages;

/// Filter column from its title or key; absent means "Date Created"
pub fn parse_filter_column(raw: Option<&str>) -> Result<DateFilterColumn, FunnelError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(DateFilterColumn::default()),
        Some(s) => s.parse().map_err(FunnelError::UnknownFilterColumn),
    }
}

/// Validates the request before anything is fetched
fn validate(request: &SalesFunnelRequest) -> Result<DateFilterColumn, FunnelError> {
    let filter_column = parse_filter_column(request.filter_column.as_deref())?;
    if request.date_from > request.date_to {
        return Err(FunnelError::InvalidDateRange {
            start: request.date_from,
            end: request.date_to,
        });
    }
    Ok(filter_column)
}

/// Get sales funnel data
pub async fn get_sales_funnel(
    state: &AppState,
    request: &SalesFunnelRequest,
) -> Result<SalesFunnelResponse> {
    let filter_column = validate(request)?;
    let cached = load_stages(state, false).await?;
    let table = engine::compute(
        &cached.stages,
        request.date_from,
        request.date_to,
        filter_column,
    )?;

    Ok(SalesFunnelResponse {
        date_from: request.date_from,
        date_to: request.date_to,
        filter_column,
        fetched_at: cached.fetched_at,
        table,
    })
}

pub async fn get_sales_funnel_csv(state: &AppState, request: &SalesFunnelRequest) -> Result<String> {
    let response = get_sales_funnel(state, request).await?;
    metrics_to_csv(&response.table)
}
