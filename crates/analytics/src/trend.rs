use adlens_core::types::{RawRecord, TrendPoint};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Default)]
struct DayAccumulator {
    results: f64,
    amount_spent: f64,
    records: usize,
}

/// Per-day results and spend sums, ordered by day ascending. A record
/// without a parsed day has no place on the time axis and is skipped.
pub fn daily_trend(records: &[RawRecord]) -> Vec<TrendPoint> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();
    for record in records {
        let day = match record.day {
            Some(day) => day,
            None => continue,
        };
        let acc = days.entry(day).or_default();
        if let Some(value) = record.results {
            acc.results += value;
        }
        if let Some(value) = record.amount_spent {
            acc.amount_spent += value;
        }
        acc.records += 1;
    }

    days.into_iter()
        .map(|(day, acc)| TrendPoint {
            day,
            results: acc.results,
            amount_spent: acc.amount_spent,
            records: acc.records,
        })
        .collect()
}
