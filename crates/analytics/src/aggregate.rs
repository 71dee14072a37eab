use adlens_core::types::{GroupSummary, RawRecord, SummaryDimension};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
struct SummaryAccumulator {
    amount_spent: f64,
    results: f64,
    impressions: f64,
    reach: f64,
    link_clicks: f64,
    records: usize,
}

impl SummaryAccumulator {
    fn add(&mut self, record: &RawRecord) {
        add_cell(&mut self.amount_spent, record.amount_spent);
        add_cell(&mut self.results, record.results);
        add_cell(&mut self.impressions, record.impressions);
        add_cell(&mut self.reach, record.reach);
        add_cell(&mut self.link_clicks, record.link_clicks);
        self.records += 1;
    }
}

fn add_cell(sum: &mut f64, cell: Option<f64>) {
    if let Some(value) = cell {
        *sum += value;
    }
}

/// Group records by the dimension key and sum the spend and outcome
/// columns, then derive the guarded ratios from the sums. Records with a
/// null key form their own group. Output is ordered by key ascending with
/// the null-key group last, so equal inputs always produce equal output.
pub fn aggregate_by(records: &[RawRecord], dimension: SummaryDimension) -> Vec<GroupSummary> {
    let mut groups: HashMap<Option<String>, SummaryAccumulator> = HashMap::new();
    for record in records {
        let key = dimension.key(record).map(str::to_string);
        groups.entry(key).or_default().add(record);
    }

    let mut rows: Vec<GroupSummary> = groups
        .into_iter()
        .map(|(key, acc)| summarize(key, acc))
        .collect();
    rows.sort_by(|a, b| compare_keys(&a.key, &b.key));

    debug!(dimension = ?dimension, groups = rows.len(), "aggregated records");
    rows
}

fn summarize(key: Option<String>, acc: SummaryAccumulator) -> GroupSummary {
    GroupSummary {
        key,
        amount_spent: acc.amount_spent,
        results: acc.results,
        impressions: acc.impressions,
        reach: acc.reach,
        link_clicks: acc.link_clicks,
        ctr_percent: ratio(acc.link_clicks, acc.impressions).map(|r| r * 100.0),
        cost_per_result: ratio(acc.amount_spent, acc.results),
        records: acc.records,
    }
}

/// A ratio over a zero denominator is undefined, not an error and not zero.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

fn compare_keys(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Reorder summary rows by cost per result ascending. Rows with an
/// undefined cost sink to the end; ties keep their key order.
pub fn sort_by_cost_per_result(rows: &mut [GroupSummary]) {
    rows.sort_by(|a, b| match (a.cost_per_result, b.cost_per_result) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(
        campaign: Option<&str>,
        ad_set: Option<&str>,
        spend: f64,
        results: f64,
        impressions: f64,
        clicks: f64,
    ) -> RawRecord {
        RawRecord {
            campaign_name: campaign.map(str::to_string),
            ad_set_name: ad_set.map(str::to_string),
            amount_spent: Some(spend),
            results: Some(results),
            impressions: Some(impressions),
            link_clicks: Some(clicks),
            ..Default::default()
        }
    }

    #[test]
    fn test_sums_and_derived_ratios() {
        let records = vec![
            make_record(Some("A"), Some("x"), 1000.0, 10.0, 5000.0, 100.0),
            make_record(Some("A"), Some("y"), 500.0, 5.0, 2000.0, 40.0),
        ];

        let rows = aggregate_by(&records, SummaryDimension::Campaign);
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.key.as_deref(), Some("A"));
        assert_eq!(row.amount_spent, 1500.0);
        assert_eq!(row.results, 15.0);
        assert_eq!(row.impressions, 7000.0);
        assert_eq!(row.link_clicks, 140.0);
        assert_eq!(row.ctr_percent, Some(2.0));
        assert_eq!(row.cost_per_result, Some(100.0));
        assert_eq!(row.records, 2);
    }

    #[test]
    fn test_groups_partition_the_records() {
        let records = vec![
            make_record(Some("A"), Some("x"), 100.0, 1.0, 10.0, 1.0),
            make_record(Some("B"), Some("x"), 100.0, 1.0, 10.0, 1.0),
            make_record(None, Some("x"), 100.0, 1.0, 10.0, 1.0),
            make_record(Some("A"), Some("y"), 100.0, 1.0, 10.0, 1.0),
        ];

        let rows = aggregate_by(&records, SummaryDimension::Campaign);
        let counted: usize = rows.iter().map(|r| r.records).sum();
        assert_eq!(counted, records.len());
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_null_key_group_sorts_last() {
        let records = vec![
            make_record(None, None, 50.0, 1.0, 10.0, 1.0),
            make_record(Some("B"), None, 50.0, 1.0, 10.0, 1.0),
            make_record(Some("A"), None, 50.0, 1.0, 10.0, 1.0),
        ];

        let rows = aggregate_by(&records, SummaryDimension::Campaign);
        let keys: Vec<Option<&str>> = rows.iter().map(|r| r.key.as_deref()).collect();
        assert_eq!(keys, vec![Some("A"), Some("B"), None]);
    }

    #[test]
    fn test_zero_denominators_leave_ratios_undefined() {
        let records = vec![make_record(Some("A"), None, 250.0, 0.0, 0.0, 0.0)];

        let rows = aggregate_by(&records, SummaryDimension::Campaign);
        assert_eq!(rows[0].cost_per_result, None);
        assert_eq!(rows[0].ctr_percent, None);
        assert_eq!(rows[0].amount_spent, 250.0);
    }

    #[test]
    fn test_null_cells_do_not_poison_sums() {
        let mut with_nulls = make_record(Some("A"), None, 100.0, 2.0, 1000.0, 10.0);
        with_nulls.amount_spent = None;
        let records = vec![
            with_nulls,
            make_record(Some("A"), None, 300.0, 4.0, 1000.0, 10.0),
        ];

        let rows = aggregate_by(&records, SummaryDimension::Campaign);
        assert_eq!(rows[0].amount_spent, 300.0);
        assert_eq!(rows[0].results, 6.0);
        assert_eq!(rows[0].records, 2);
    }

    #[test]
    fn test_ad_set_dimension_uses_ad_set_key() {
        let records = vec![
            make_record(Some("A"), Some("x"), 100.0, 1.0, 10.0, 1.0),
            make_record(Some("B"), Some("x"), 100.0, 1.0, 10.0, 1.0),
        ];

        let rows = aggregate_by(&records, SummaryDimension::AdSet);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key.as_deref(), Some("x"));
        assert_eq!(rows[0].records, 2);
    }

    #[test]
    fn test_sort_by_cost_puts_undefined_last() {
        let records = vec![
            make_record(Some("cheap"), None, 100.0, 10.0, 10.0, 1.0),
            make_record(Some("pricey"), None, 900.0, 3.0, 10.0, 1.0),
            make_record(Some("undefined"), None, 400.0, 0.0, 10.0, 1.0),
        ];

        let mut rows = aggregate_by(&records, SummaryDimension::Campaign);
        sort_by_cost_per_result(&mut rows);

        let keys: Vec<&str> = rows.iter().filter_map(|r| r.key.as_deref()).collect();
        assert_eq!(keys, vec!["cheap", "pricey", "undefined"]);
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(aggregate_by(&[], SummaryDimension::Campaign).is_empty());
    }
}
