use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;
use crate::shared::app_state::SharedState;

/// All application routes
pub fn configure_routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // U601 Import from monday.com
        .route("/api/u601/import", post(handlers::u601_import_from_monday::import))
        .route(
            "/api/u601/stages/:stage/csv",
            get(handlers::u601_import_from_monday::get_stage_csv),
        )
        // D500 Sales funnel dashboard
        .route(
            "/api/d500/sales_funnel",
            get(handlers::d500_sales_funnel::get_sales_funnel),
        )
        .route(
            "/api/d500/sales_funnel/csv",
            get(handlers::d500_sales_funnel::get_sales_funnel_csv),
        )
        .with_state(state)
}
