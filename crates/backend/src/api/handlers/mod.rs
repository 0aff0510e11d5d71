pub mod d500_sales_funnel;
pub mod u601_import_from_monday;

use axum::http::{header, StatusCode};

use crate::dashboards::d500_sales_funnel::FunnelError;

pub type ApiError = (StatusCode, String);

/// Contract violations become 400, everything else comes from fetching the board: 502
pub fn error_response(context: &str, e: anyhow::Error) -> ApiError {
    if let Some(violation) = e.downcast_ref::<FunnelError>() {
        tracing::warn!("{}: rejected request: {}", context, violation);
        return (StatusCode::BAD_REQUEST, violation.to_string());
    }
    tracing::error!("{}: {:#}", context, e);
    (StatusCode::BAD_GATEWAY, format!("{:#}", e))
}

/// Headers for a CSV download named `filename`
pub fn csv_headers(filename: &str) -> [(header::HeaderName, String); 2] {
    [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ]
}
