use chrono::NaiveDate;
use thiserror::Error;

/// Caller-side contract violations; reported before any computation starts
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FunnelError {
    #[error("Start date {start} must not be after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Unknown filter column '{0}', expected 'Date Created' or 'Sales Call Date'")]
    UnknownFilterColumn(String),

    #[error("Unknown stage '{0}'")]
    UnknownStage(String),
}
