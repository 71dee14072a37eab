use adlens_core::types::{GroupSummary, KpiOverview, SummaryDimension, TrendPoint};
use adlens_core::{fields, AdLensError, AdLensResult};
use chrono::NaiveDate;

/// A summary table as a CSV document: canonical header row, one line per
/// group, null metrics as empty cells.
pub fn summary_csv(rows: &[GroupSummary], dimension: SummaryDimension) -> AdLensResult<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        dimension.key_field(),
        fields::AMOUNT_SPENT,
        fields::RESULTS,
        fields::IMPRESSIONS,
        fields::REACH,
        fields::LINK_CLICKS,
        "ctr_percent",
        fields::COST_PER_RESULT,
        "records",
    ])?;
    for row in rows {
        writer.write_record([
            row.key.clone().unwrap_or_default(),
            format_value(row.amount_spent),
            format_value(row.results),
            format_value(row.impressions),
            format_value(row.reach),
            format_value(row.link_clicks),
            format_cell(row.ctr_percent),
            format_cell(row.cost_per_result),
            row.records.to_string(),
        ])?;
    }
    finish(writer)
}

/// The daily trend as a CSV document, one line per day.
pub fn trend_csv(points: &[TrendPoint]) -> AdLensResult<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([fields::DAY, fields::RESULTS, fields::AMOUNT_SPENT, "records"])?;
    for point in points {
        writer.write_record([
            format_day(point.day),
            format_value(point.results),
            format_value(point.amount_spent),
            point.records.to_string(),
        ])?;
    }
    finish(writer)
}

/// The KPI overview as a single-row CSV document.
pub fn overview_csv(kpis: &KpiOverview) -> AdLensResult<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "total_spend",
        "total_results",
        "avg_ctr",
        "records",
        "first_day",
        "last_day",
    ])?;
    writer.write_record([
        format_value(kpis.total_spend),
        format_value(kpis.total_results),
        format_cell(kpis.avg_ctr),
        kpis.records.to_string(),
        kpis.first_day.map(format_day).unwrap_or_default(),
        kpis.last_day.map(format_day).unwrap_or_default(),
    ])?;
    finish(writer)
}

fn format_value(value: f64) -> String {
    value.to_string()
}

/// Null metrics export as empty cells, matching the null cells of the
/// source format.
fn format_cell(value: Option<f64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => String::new(),
    }
}

fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

fn finish(mut writer: csv::Writer<Vec<u8>>) -> AdLensResult<String> {
    writer.flush()?;
    let buffer = writer
        .into_inner()
        .map_err(|e| AdLensError::Export(e.to_string()))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> GroupSummary {
        GroupSummary {
            key: Some("Summer Push".to_string()),
            amount_spent: 1500.0,
            results: 15.0,
            impressions: 7000.0,
            reach: 5000.0,
            link_clicks: 140.0,
            ctr_percent: Some(2.0),
            cost_per_result: Some(100.0),
            records: 2,
        }
    }

    #[test]
    fn test_summary_csv_layout() {
        let csv = summary_csv(&[sample_row()], SummaryDimension::Campaign).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some(
                "campaign_name,amount_spent,results,impressions,reach,link_clicks,\
                 ctr_percent,cost_per_result,records"
            )
        );
        assert_eq!(lines.next(), Some("Summer Push,1500,15,7000,5000,140,2,100,2"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_null_metrics_are_empty_cells() {
        let mut row = sample_row();
        row.key = None;
        row.ctr_percent = None;
        row.cost_per_result = None;

        let csv = summary_csv(&[row], SummaryDimension::AdSet).unwrap();
        let mut lines = csv.lines();

        assert!(lines.next().unwrap().starts_with("ad_set_name,"));
        assert_eq!(lines.next(), Some(",1500,15,7000,5000,140,,,2"));
    }

    #[test]
    fn test_trend_csv_layout() {
        let points = vec![TrendPoint {
            day: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            results: 12.0,
            amount_spent: 340.5,
            records: 3,
        }];

        let csv = trend_csv(&points).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("day,results,amount_spent,records"));
        assert_eq!(lines.next(), Some("2024-05-01,12,340.5,3"));
    }

    #[test]
    fn test_overview_csv_layout() {
        let kpis = KpiOverview {
            total_spend: 1500.0,
            total_results: 15.0,
            avg_ctr: None,
            records: 2,
            first_day: NaiveDate::from_ymd_opt(2024, 5, 1),
            last_day: None,
        };

        let csv = overview_csv(&kpis).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("total_spend,total_results,avg_ctr,records,first_day,last_day")
        );
        assert_eq!(lines.next(), Some("1500,15,,2,2024-05-01,"));
    }

    #[test]
    fn test_keys_with_commas_are_quoted() {
        let mut row = sample_row();
        row.key = Some("Lagos, Mainland".to_string());

        let csv = summary_csv(&[row], SummaryDimension::Campaign).unwrap();
        assert!(csv.contains("\"Lagos, Mainland\""));
    }
}
