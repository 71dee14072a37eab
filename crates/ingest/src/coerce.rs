use crate::normalize::NormalizedTable;
use adlens_core::fields;
use adlens_core::types::RawRecord;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

/// Date-only formats accepted for date cells, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Timestamp formats whose date part is taken when the cell carries a time.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Coerce normalized string rows into typed records. Coercion never fails
/// the run: a cell that does not parse under its column's type becomes a
/// null, and only the malformed cell is lost.
pub fn coerce_types(table: &NormalizedTable) -> Vec<RawRecord> {
    let columns = &table.schema.columns;
    let mut nulled: u64 = 0;

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut record = RawRecord::default();
        for (idx, label) in columns.iter().enumerate() {
            let cell = row.get(idx).map(String::as_str).unwrap_or("");
            assign(&mut record, label, cell, &mut nulled);
        }
        records.push(record);
    }

    if nulled > 0 {
        metrics::counter!("ingest.cells_nulled").increment(nulled);
        debug!(cells = nulled, "malformed cells degraded to null");
    }
    metrics::counter!("ingest.rows_coerced").increment(records.len() as u64);
    records
}

fn assign(record: &mut RawRecord, label: &str, cell: &str, nulled: &mut u64) {
    match label {
        // Text assignments only override with a value, so when a label
        // appears twice the later occurrence wins unless its cell is empty.
        fields::CAMPAIGN_NAME => {
            if let Some(value) = non_empty(cell) {
                record.campaign_name = Some(value);
            }
        }
        fields::AD_SET_NAME => {
            if let Some(value) = non_empty(cell) {
                record.ad_set_name = Some(value);
            }
        }
        fields::AD_NAME => {
            if let Some(value) = non_empty(cell) {
                record.ad_name = Some(value);
            }
        }
        fields::DAY => record.day = date_cell(cell, nulled),
        fields::REPORTING_STARTS => record.reporting_starts = date_cell(cell, nulled),
        fields::REPORTING_ENDS => record.reporting_ends = date_cell(cell, nulled),
        fields::AMOUNT_SPENT => record.amount_spent = numeric_cell(cell, nulled),
        fields::RESULTS => record.results = numeric_cell(cell, nulled),
        fields::IMPRESSIONS => record.impressions = numeric_cell(cell, nulled),
        fields::REACH => record.reach = numeric_cell(cell, nulled),
        fields::LINK_CLICKS => record.link_clicks = numeric_cell(cell, nulled),
        fields::FREQUENCY => record.frequency = numeric_cell(cell, nulled),
        fields::CPC => record.cpc = numeric_cell(cell, nulled),
        fields::CTR => record.ctr = numeric_cell(cell, nulled),
        fields::COST_PER_RESULT => record.cost_per_result = numeric_cell(cell, nulled),
        extra_label => {
            if !cell.is_empty() {
                record
                    .extra
                    .insert(extra_label.to_string(), cell.to_string());
            }
        }
    }
}

/// Strict numeric parse. Empty means missing, not malformed; anything that
/// is not a finite `f64` is rejected.
pub(crate) fn parse_numeric(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a date cell against the accepted formats, first match wins.
pub(crate) fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cell, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(timestamp.date());
        }
    }
    None
}

fn numeric_cell(cell: &str, nulled: &mut u64) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = parse_numeric(trimmed);
    if parsed.is_none() {
        *nulled += 1;
    }
    parsed
}

fn date_cell(cell: &str, nulled: &mut u64) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = parse_date(trimmed);
    if parsed.is_none() {
        *nulled += 1;
    }
    parsed
}

fn non_empty(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
