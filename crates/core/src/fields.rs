//! Canonical field names of the normalized report schema.

pub const CAMPAIGN_NAME: &str = "campaign_name";
pub const AD_SET_NAME: &str = "ad_set_name";
pub const AD_NAME: &str = "ad_name";
pub const DAY: &str = "day";
pub const REPORTING_STARTS: &str = "reporting_starts";
pub const REPORTING_ENDS: &str = "reporting_ends";
pub const AMOUNT_SPENT: &str = "amount_spent";
pub const RESULTS: &str = "results";
pub const IMPRESSIONS: &str = "impressions";
pub const REACH: &str = "reach";
pub const LINK_CLICKS: &str = "link_clicks";
pub const FREQUENCY: &str = "frequency";
pub const CPC: &str = "cpc";
pub const CTR: &str = "ctr";
pub const COST_PER_RESULT: &str = "cost_per_result";

/// Numeric fields, coerced to `f64` cells by the ingest stage.
pub const NUMERIC: [&str; 9] = [
    AMOUNT_SPENT,
    RESULTS,
    IMPRESSIONS,
    REACH,
    LINK_CLICKS,
    FREQUENCY,
    CPC,
    CTR,
    COST_PER_RESULT,
];

/// Date fields, coerced to calendar dates.
pub const DATE: [&str; 3] = [DAY, REPORTING_STARTS, REPORTING_ENDS];

/// Free-text fields.
pub const TEXT: [&str; 3] = [CAMPAIGN_NAME, AD_SET_NAME, AD_NAME];

/// Grouping columns the pipeline cannot run without. Their absence after
/// normalization is a fatal schema error.
pub const REQUIRED: [&str; 3] = [CAMPAIGN_NAME, AD_SET_NAME, DAY];

/// Whether a canonical label belongs to the fixed schema. Anything else is
/// carried through as an extra column.
pub fn is_known(label: &str) -> bool {
    TEXT.contains(&label)
        || DATE.contains(&label)
        || NUMERIC.contains(&label)
}
