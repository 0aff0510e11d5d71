use anyhow::Result;
use contracts::dashboards::d500_sales_funnel::{MetricsRow, MetricsTable, METRIC_COLUMNS};
use contracts::shared::table::Table;

use crate::dashboards::d500_sales_funnel::engine::OWNER_COLUMN;
use crate::shared::format::{format_money, format_percent};

/// Trailing column telling the aggregate row apart from an owner called "Total"
pub const IS_TOTAL_COLUMN: &str = "Is Total";

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Header row with the table's columns, then every row as-is
pub fn table_to_csv(table: &Table) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    finish(writer)
}

fn metrics_record(row: &MetricsRow) -> Vec<String> {
    vec![
        row.owner.clone(),
        row.new_calls_booked.to_string(),
        row.sales_call_taken.to_string(),
        format_percent(row.proposal_rate),
        format_percent(row.show_rate),
        format_percent(row.unqualified_rate),
        format_percent(row.cancellation_rate),
        format_percent(row.close_rate),
        format_percent(row.close_rate_show),
        format_percent(row.close_rate_mql),
        format_money(row.closed_revenue),
        format_money(row.revenue_per_call),
        format_money(row.revenue_per_showed_up),
        format_money(row.revenue_per_proposal),
        format_money(row.pipeline_revenue),
        row.is_total.to_string(),
    ]
}

/// Funnel table as CSV: `Owner`, the 14 metric columns and `Is Total`.
/// Rates are written as percentages, money with two decimals.
pub fn metrics_to_csv(metrics: &MetricsTable) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header = vec![OWNER_COLUMN];
    header.extend(METRIC_COLUMNS);
    header.push(IS_TOTAL_COLUMN);
    writer.write_record(&header)?;
    for row in &metrics.rows {
        writer.write_record(metrics_record(row))?;
    }
    finish(writer)
}
