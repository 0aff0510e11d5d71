use chrono::{DateTime, NaiveDate, NaiveDateTime};
use contracts::dashboards::d500_sales_funnel::{MetricsRow, MetricsTable, TOTAL_OWNER};
use contracts::enums::date_filter_column::DateFilterColumn;
use contracts::enums::stage_label::StageLabel;
use contracts::shared::table::Table;
use std::collections::{HashMap, HashSet};

use super::FunnelError;
use crate::shared::data::stage_tables::StageTables;

pub const OWNER_COLUMN: &str = "Owner";
pub const DEAL_VALUE_COLUMN: &str = "Deal Value";

// ---------------------------------------------------------------------------
// Value coercion
// ---------------------------------------------------------------------------

/// `numerator / denominator`, or 0 when the denominator is 0 or the result is not finite.
pub fn safe_divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Calendar date of a board date cell; `None` for blank or unrecognised text.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

/// Numeric deal value; anything unparsable or non-finite counts as 0.
pub fn parse_deal_value(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Per-owner aggregation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct OwnerTally {
    booked: u64,
    taken: u64,
    unqualified: u64,
    cancelled: u64,
    proposals: u64,
    closes: u64,
    closed_revenue: f64,
    pipeline_revenue: f64,
}

impl OwnerTally {
    fn record(&mut self, stage: StageLabel, deal_value: f64) {
        self.booked += 1;
        if stage.counts_as_sales_call_taken() {
            self.taken += 1;
        }
        match stage {
            StageLabel::Unqualified => self.unqualified += 1,
            StageLabel::Cancelled => self.cancelled += 1,
            StageLabel::Proposal => {
                self.proposals += 1;
                self.pipeline_revenue += deal_value;
            }
            StageLabel::Won => {
                self.closes += 1;
                self.closed_revenue += deal_value;
            }
            StageLabel::Scheduled | StageLabel::Noshow | StageLabel::Lost => {}
        }
    }

    fn add(&mut self, other: &OwnerTally) {
        self.booked += other.booked;
        self.taken += other.taken;
        self.unqualified += other.unqualified;
        self.cancelled += other.cancelled;
        self.proposals += other.proposals;
        self.closes += other.closes;
        self.closed_revenue += other.closed_revenue;
        self.pipeline_revenue += other.pipeline_revenue;
    }

    /// Derives the rate columns from this tally. The Total row goes through the same
    /// path with global sums, so its rates are never averages of owner rates.
    fn to_row(&self, owner: &str, is_total: bool) -> MetricsRow {
        let booked = self.booked as f64;
        let taken = self.taken as f64;
        let proposals = self.proposals as f64;
        let closes = self.closes as f64;

        MetricsRow {
            owner: owner.to_string(),
            is_total,
            new_calls_booked: self.booked,
            sales_call_taken: self.taken,
            proposal_rate: safe_divide(proposals + closes, booked),
            show_rate: safe_divide(taken, booked),
            unqualified_rate: safe_divide(self.unqualified as f64, booked),
            cancellation_rate: safe_divide(self.cancelled as f64, booked),
            close_rate: safe_divide(closes, booked),
            close_rate_show: safe_divide(closes, taken),
            close_rate_mql: safe_divide(closes, proposals),
            closed_revenue: self.closed_revenue,
            revenue_per_call: safe_divide(self.closed_revenue, booked),
            revenue_per_showed_up: safe_divide(self.closed_revenue, taken),
            revenue_per_proposal: safe_divide(self.closed_revenue, proposals),
            pipeline_revenue: self.pipeline_revenue,
        }
    }
}

fn owner_of(owner_idx: Option<usize>, row: &[String]) -> Option<&str> {
    owner_idx
        .and_then(|idx| row.get(idx))
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
}

/// Stage order in which owners are discovered; the owner rows follow it.
const OWNER_SCAN_ORDER: [StageLabel; 7] = [
    StageLabel::Cancelled,
    StageLabel::Lost,
    StageLabel::Noshow,
    StageLabel::Proposal,
    StageLabel::Scheduled,
    StageLabel::Unqualified,
    StageLabel::Won,
];

/// Distinct non-empty owners over all stages, in order of first appearance.
fn discover_owners(stages: &StageTables) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut owners = Vec::new();
    for stage in OWNER_SCAN_ORDER {
        let table = stages.get(stage);
        let owner_idx = table.column_index(OWNER_COLUMN);
        for row in &table.rows {
            if let Some(owner) = owner_of(owner_idx, row) {
                if seen.insert(owner) {
                    owners.push(owner);
                }
            }
        }
    }
    owners
}

/// Owner and deal value of every row whose filter-column date lies in `[start, end]`.
/// Rows without a parsable date or without an owner are skipped.
fn filter_stage<'a>(
    table: &'a Table,
    filter_column: DateFilterColumn,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<(&'a str, f64)> {
    let Some(date_idx) = table.column_index(filter_column.column_name()) else {
        return Vec::new();
    };
    let owner_idx = table.column_index(OWNER_COLUMN);
    let value_idx = table.column_index(DEAL_VALUE_COLUMN);

    table
        .rows
        .iter()
        .filter(|row| {
            row.get(date_idx)
                .and_then(|raw| parse_calendar_date(raw))
                .is_some_and(|date| start <= date && date <= end)
        })
        .filter_map(|row| {
            let owner = owner_of(owner_idx, row)?;
            let value = value_idx
                .and_then(|idx| row.get(idx))
                .map(|raw| parse_deal_value(raw))
                .unwrap_or(0.0);
            Some((owner, value))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Public compute function
// ---------------------------------------------------------------------------

/// Builds the funnel table: one row per owner plus a trailing Total row.
///
/// Pure over its inputs. Malformed dates exclude a row, malformed deal values count
/// as 0 and a missing stage behaves as an empty one.
pub fn compute(
    stages: &StageTables,
    start: NaiveDate,
    end: NaiveDate,
    filter_column: DateFilterColumn,
) -> Result<MetricsTable, FunnelError> {
    if start > end {
        return Err(FunnelError::InvalidDateRange { start, end });
    }

    let owners = discover_owners(stages);
    let mut tallies: HashMap<&str, OwnerTally> = owners
        .iter()
        .map(|owner| (*owner, OwnerTally::default()))
        .collect();

    let mut in_range = 0usize;
    for stage in StageLabel::all() {
        for (owner, deal_value) in filter_stage(stages.get(stage), filter_column, start, end) {
            if let Some(tally) = tallies.get_mut(owner) {
                tally.record(stage, deal_value);
                in_range += 1;
            }
        }
    }

    let mut total = OwnerTally::default();
    let mut rows = Vec::with_capacity(owners.len() + 1);
    for owner in &owners {
        let tally = tallies.get(owner).copied().unwrap_or_default();
        total.add(&tally);
        rows.push(tally.to_row(owner, false));
    }
    rows.push(total.to_row(TOTAL_OWNER, true));

    tracing::debug!(
        "Sales funnel {}..{} by '{}': {} owners, {} rows in range",
        start,
        end,
        filter_column,
        owners.len(),
        in_range
    );

    Ok(MetricsTable { rows })
}
