use crate::fields;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of an advertising report, after schema normalization and type
/// coercion. Every value field is explicitly optional: a missing or
/// unparseable cell is `None`, never a load failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub campaign_name: Option<String>,
    /// When the source carries a duplicate ad-set-name column, this holds
    /// the fully-qualified variant.
    pub ad_set_name: Option<String>,
    pub ad_name: Option<String>,
    pub day: Option<NaiveDate>,
    pub reporting_starts: Option<NaiveDate>,
    pub reporting_ends: Option<NaiveDate>,
    pub amount_spent: Option<f64>,
    pub results: Option<f64>,
    pub impressions: Option<f64>,
    pub reach: Option<f64>,
    pub link_clicks: Option<f64>,
    pub frequency: Option<f64>,
    pub cpc: Option<f64>,
    pub ctr: Option<f64>,
    pub cost_per_result: Option<f64>,
    /// Unrecognized source columns, preserved unchanged
    /// (normalized label -> raw cell text).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl RawRecord {
    /// Value of a numeric field by canonical name. `None` for a null cell
    /// and for names outside the numeric field set.
    pub fn numeric(&self, field: &str) -> Option<f64> {
        match field {
            fields::AMOUNT_SPENT => self.amount_spent,
            fields::RESULTS => self.results,
            fields::IMPRESSIONS => self.impressions,
            fields::REACH => self.reach,
            fields::LINK_CLICKS => self.link_clicks,
            fields::FREQUENCY => self.frequency,
            fields::CPC => self.cpc,
            fields::CTR => self.ctr,
            fields::COST_PER_RESULT => self.cost_per_result,
            _ => None,
        }
    }
}

/// Grouping dimension of a summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryDimension {
    Campaign,
    AdSet,
}

impl SummaryDimension {
    /// Canonical name of the grouping column.
    pub fn key_field(&self) -> &'static str {
        match self {
            SummaryDimension::Campaign => fields::CAMPAIGN_NAME,
            SummaryDimension::AdSet => fields::AD_SET_NAME,
        }
    }

    /// Grouping key of a record under this dimension.
    pub fn key<'a>(&self, record: &'a RawRecord) -> Option<&'a str> {
        match self {
            SummaryDimension::Campaign => record.campaign_name.as_deref(),
            SummaryDimension::AdSet => record.ad_set_name.as_deref(),
        }
    }
}

/// One row of a campaign or ad-set summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Group key value; `None` is the group of records with a null key.
    pub key: Option<String>,
    pub amount_spent: f64,
    pub results: f64,
    pub impressions: f64,
    pub reach: f64,
    pub link_clicks: f64,
    /// link_clicks / impressions x 100; `None` when the group has no
    /// impressions.
    pub ctr_percent: Option<f64>,
    /// amount_spent / results; `None` when the group has no results.
    pub cost_per_result: Option<f64>,
    /// Raw records aggregated into this row.
    pub records: usize,
}

/// One day of the results/spend time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub day: NaiveDate,
    pub results: f64,
    pub amount_spent: f64,
    pub records: usize,
}

/// Whole-dataset totals for the dashboard header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiOverview {
    pub total_spend: f64,
    pub total_results: f64,
    /// Mean of per-record CTR over non-null cells; `None` when no record
    /// carries one.
    pub avg_ctr: Option<f64>,
    pub records: usize,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
}

/// Distribution snapshot of one numeric field across the record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub field: String,
    /// Non-null cells.
    pub count: usize,
    pub mean: Option<f64>,
    /// Population standard deviation of the non-null cells; 0 for a single
    /// value, `None` for none.
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    /// Quartiles of the non-null cells, linearly interpolated between the
    /// two closest ranks.
    pub p25: Option<f64>,
    pub median: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}
