use adlens_core::types::RawRecord;
use tracing::debug;

/// Allow-list filter over the two grouping dimensions. An empty list means
/// the dimension is unconstrained, never "match nothing". Both dimensions
/// must pass for a record to survive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub campaigns: Vec<String>,
    pub ad_sets: Vec<String>,
}

impl RecordFilter {
    pub fn new(campaigns: Vec<String>, ad_sets: Vec<String>) -> Self {
        Self { campaigns, ad_sets }
    }

    /// True when no dimension is constrained.
    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty() && self.ad_sets.is_empty()
    }

    /// Whether a record passes both allow-lists. A record with a null key
    /// can never match a named entry, so a constrained dimension drops it.
    pub fn matches(&self, record: &RawRecord) -> bool {
        dimension_matches(&self.campaigns, record.campaign_name.as_deref())
            && dimension_matches(&self.ad_sets, record.ad_set_name.as_deref())
    }

    /// The records passing the filter, in input order.
    pub fn apply(&self, records: &[RawRecord]) -> Vec<RawRecord> {
        if self.is_empty() {
            return records.to_vec();
        }
        let kept: Vec<RawRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        debug!(kept = kept.len(), total = records.len(), "record filter applied");
        kept
    }
}

fn dimension_matches(allow: &[String], key: Option<&str>) -> bool {
    if allow.is_empty() {
        return true;
    }
    match key {
        Some(key) => allow.iter().any(|entry| entry == key),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(campaign: Option<&str>, ad_set: Option<&str>) -> RawRecord {
        RawRecord {
            campaign_name: campaign.map(str::to_string),
            ad_set_name: ad_set.map(str::to_string),
            ..Default::default()
        }
    }

    fn sample_records() -> Vec<RawRecord> {
        vec![
            make_record(Some("A"), Some("x")),
            make_record(Some("A"), Some("y")),
            make_record(Some("B"), Some("x")),
            make_record(None, Some("x")),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = RecordFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&sample_records()).len(), 4);
    }

    #[test]
    fn test_campaign_allow_list() {
        let filter = RecordFilter::new(vec!["A".to_string()], vec![]);
        let kept = filter.apply(&sample_records());

        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.campaign_name.as_deref() == Some("A")));
    }

    #[test]
    fn test_dimensions_combine_as_and() {
        let filter = RecordFilter::new(vec!["A".to_string()], vec!["x".to_string()]);
        let kept = filter.apply(&sample_records());

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].ad_set_name.as_deref(), Some("x"));
    }

    #[test]
    fn test_null_key_fails_a_constrained_dimension() {
        let filter = RecordFilter::new(vec!["A".to_string(), "B".to_string()], vec![]);
        let kept = filter.apply(&sample_records());

        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|r| r.campaign_name.is_some()));
    }

    #[test]
    fn test_multiple_entries_union_within_a_dimension() {
        let filter = RecordFilter::new(vec![], vec!["x".to_string(), "y".to_string()]);
        assert_eq!(filter.apply(&sample_records()).len(), 4);
    }
}
