use adlens_core::types::{GroupSummary, KpiOverview, SummaryDimension, TrendPoint};
use adlens_core::AdLensResult;
use serde_json::{Map, Value};

/// Summary rows as a JSON array of objects. The group key is emitted under
/// the dimension's canonical column name, so a campaign row reads
/// `{"campaign_name": ...}` and an ad-set row `{"ad_set_name": ...}`.
pub fn summary_json(rows: &[GroupSummary], dimension: SummaryDimension) -> AdLensResult<String> {
    let objects: Vec<Value> = rows.iter().map(|row| summary_object(row, dimension)).collect();
    Ok(serde_json::to_string_pretty(&objects)?)
}

fn summary_object(row: &GroupSummary, dimension: SummaryDimension) -> Value {
    let mut object = Map::new();
    object.insert(dimension.key_field().to_string(), json_value(&row.key));
    object.insert("amount_spent".to_string(), row.amount_spent.into());
    object.insert("results".to_string(), row.results.into());
    object.insert("impressions".to_string(), row.impressions.into());
    object.insert("reach".to_string(), row.reach.into());
    object.insert("link_clicks".to_string(), row.link_clicks.into());
    object.insert("ctr_percent".to_string(), option_value(row.ctr_percent));
    object.insert("cost_per_result".to_string(), option_value(row.cost_per_result));
    object.insert("records".to_string(), row.records.into());
    Value::Object(object)
}

/// The daily trend as a JSON array, days in ISO form.
pub fn trend_json(points: &[TrendPoint]) -> AdLensResult<String> {
    Ok(serde_json::to_string_pretty(points)?)
}

/// The KPI overview as a single JSON object.
pub fn overview_json(kpis: &KpiOverview) -> AdLensResult<String> {
    Ok(serde_json::to_string_pretty(kpis)?)
}

fn json_value(key: &Option<String>) -> Value {
    match key {
        Some(key) => Value::String(key.clone()),
        None => Value::Null,
    }
}

fn option_value(value: Option<f64>) -> Value {
    match value {
        Some(value) => value.into(),
        None => Value::Null,
    }
}
