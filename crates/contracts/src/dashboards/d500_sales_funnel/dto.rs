use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::date_filter_column::DateFilterColumn;

/// Owner label carried by the aggregate row.
pub const TOTAL_OWNER: &str = "Total";

/// Metric column titles, in table order (after `Owner`).
pub const METRIC_COLUMNS: [&str; 14] = [
    "New Calls Booked",
    "Sales Call Taken",
    "Proposal Rate",
    "Show Rate",
    "Unqualified Rate",
    "Cancellation Rate",
    "Close Rate",
    "Close Rate(Show)",
    "Close Rate(MQL)",
    "Closed Revenue",
    "Revenue Per Call",
    "Revenue Per Showed Up",
    "Revenue Per Proposal",
    "Pipeline Revenue",
];

/// Request for the sales funnel dashboard
///
/// GET /api/d500/sales_funnel?date_from=2024-10-01&date_to=2024-10-25&filter_column=Date%20Created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesFunnelRequest {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    /// Column title or snake-case key; defaults to "Date Created"
    #[serde(default)]
    pub filter_column: Option<String>,
}

/// One line of the funnel table. Rates are fractions (1.0 = 100%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    pub owner: String,
    /// Set only on the aggregate row; the owner text is not used to detect it
    #[serde(default)]
    pub is_total: bool,
    pub new_calls_booked: u64,
    pub sales_call_taken: u64,
    pub proposal_rate: f64,
    pub show_rate: f64,
    pub unqualified_rate: f64,
    pub cancellation_rate: f64,
    pub close_rate: f64,
    pub close_rate_show: f64,
    pub close_rate_mql: f64,
    pub closed_revenue: f64,
    pub revenue_per_call: f64,
    pub revenue_per_showed_up: f64,
    pub revenue_per_proposal: f64,
    pub pipeline_revenue: f64,
}

/// Owner rows in order of first appearance followed by the Total row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsTable {
    pub rows: Vec<MetricsRow>,
}

impl MetricsTable {
    pub fn owner_rows(&self) -> impl Iterator<Item = &MetricsRow> {
        self.rows.iter().filter(|r| !r.is_total)
    }

    pub fn total(&self) -> Option<&MetricsRow> {
        self.rows.iter().rev().find(|r| r.is_total)
    }

    pub fn owner(&self, owner: &str) -> Option<&MetricsRow> {
        self.owner_rows().find(|r| r.owner == owner)
    }
}

/// Response for the sales funnel dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesFunnelResponse {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub filter_column: DateFilterColumn,
    /// When the stage tables behind this table were fetched
    pub fetched_at: DateTime<Utc>,
    pub table: MetricsTable,
}
