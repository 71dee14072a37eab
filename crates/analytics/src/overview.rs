use adlens_core::fields;
use adlens_core::types::{KpiOverview, MetricStats, RawRecord};

/// Headline totals for a dataset: summed spend and results, the mean of
/// the per-record CTR column, and the covered date span. The CTR average
/// deliberately reads the reported per-record values rather than deriving
/// a pooled clicks-over-impressions rate.
pub fn overview(records: &[RawRecord]) -> KpiOverview {
    let mut total_spend = 0.0;
    let mut total_results = 0.0;
    let mut ctr_sum = 0.0;
    let mut ctr_count = 0usize;
    let mut first_day = None;
    let mut last_day = None;

    for record in records {
        if let Some(value) = record.amount_spent {
            total_spend += value;
        }
        if let Some(value) = record.results {
            total_results += value;
        }
        if let Some(value) = record.ctr {
            ctr_sum += value;
            ctr_count += 1;
        }
        if let Some(day) = record.day {
            first_day = Some(match first_day {
                Some(existing) if existing < day => existing,
                _ => day,
            });
            last_day = Some(match last_day {
                Some(existing) if existing > day => existing,
                _ => day,
            });
        }
    }

    let avg_ctr = if ctr_count > 0 {
        Some(ctr_sum / ctr_count as f64)
    } else {
        None
    };

    KpiOverview {
        total_spend,
        total_results,
        avg_ctr,
        records: records.len(),
        first_day,
        last_day,
    }
}

/// Distribution stats for every numeric field, in canonical field order:
/// count, mean, population standard deviation, min, quartiles, max. Fields
/// with no parsed values report a zero count and undefined moments.
pub fn metric_stats(records: &[RawRecord]) -> Vec<MetricStats> {
    fields::NUMERIC
        .iter()
        .map(|field| field_stats(records, field))
        .collect()
}

fn field_stats(records: &[RawRecord], field: &str) -> MetricStats {
    let mut values: Vec<f64> = records
        .iter()
        .filter_map(|record| record.numeric(field))
        .collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len();
    if count == 0 {
        return MetricStats {
            field: field.to_string(),
            count: 0,
            mean: None,
            std_dev: None,
            min: None,
            p25: None,
            median: None,
            p75: None,
            max: None,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;
    let variance = values
        .iter()
        .map(|value| {
            let delta = value - mean;
            delta * delta
        })
        .sum::<f64>()
        / count as f64;

    MetricStats {
        field: field.to_string(),
        count,
        mean: Some(mean),
        std_dev: Some(variance.sqrt()),
        min: Some(values[0]),
        p25: Some(percentile(&values, 0.25)),
        median: Some(percentile(&values, 0.5)),
        p75: Some(percentile(&values, 0.75)),
        max: Some(values[count - 1]),
    }
}

/// Percentile of a sorted, non-empty slice, linearly interpolated between
/// the two closest ranks.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;
    if fraction == 0.0 {
        sorted[lower]
    } else {
        sorted[lower] + fraction * (sorted[lower + 1] - sorted[lower])
    }
}
