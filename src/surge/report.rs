use super::classifier::{ExcludedRecord, SurgeCategory, SurgeRecord};
use super::thresholds::SurgeThresholds;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Classified records grouped by momentum bucket.
///
/// Bucket ordering:
/// - surging, growing, stable: percent change descending
/// - declining: percent change ascending (steepest drop first)
/// - new entrants: current value descending
///
/// Ties always fall back to code ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurgeReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub thresholds: SurgeThresholds,
    pub surging: Vec<SurgeRecord>,
    pub growing: Vec<SurgeRecord>,
    pub stable: Vec<SurgeRecord>,
    pub declining: Vec<SurgeRecord>,
    pub new_entrants: Vec<SurgeRecord>,
    pub excluded: Vec<ExcludedRecord>,
}

impl SurgeReport {
    pub fn new(
        thresholds: SurgeThresholds,
        records: Vec<SurgeRecord>,
        excluded: Vec<ExcludedRecord>,
    ) -> Self {
        let mut report = Self {
            context: None,
            thresholds,
            surging: Vec::new(),
            growing: Vec::new(),
            stable: Vec::new(),
            declining: Vec::new(),
            new_entrants: Vec::new(),
            excluded,
        };

        for record in records {
            report.bucket_mut(record.category).push(record);
        }

        report.surging.sort_by(by_change_descending);
        report.growing.sort_by(by_change_descending);
        report.stable.sort_by(by_change_descending);
        report.declining.sort_by(by_change_ascending);
        report.new_entrants.sort_by(|a, b| {
            b.current_value
                .total_cmp(&a.current_value)
                .then_with(|| a.code.cmp(&b.code))
        });
        report
    }

    /// Label the presentation context these thresholds belong to.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn bucket(&self, category: SurgeCategory) -> &[SurgeRecord] {
        match category {
            SurgeCategory::Surging => &self.surging,
            SurgeCategory::Growing => &self.growing,
            SurgeCategory::Stable => &self.stable,
            SurgeCategory::Declining => &self.declining,
            SurgeCategory::NewEntrant => &self.new_entrants,
        }
    }

    fn bucket_mut(&mut self, category: SurgeCategory) -> &mut Vec<SurgeRecord> {
        match category {
            SurgeCategory::Surging => &mut self.surging,
            SurgeCategory::Growing => &mut self.growing,
            SurgeCategory::Stable => &mut self.stable,
            SurgeCategory::Declining => &mut self.declining,
            SurgeCategory::NewEntrant => &mut self.new_entrants,
        }
    }

    /// All classified records, bucket by bucket.
    pub fn records(&self) -> impl Iterator<Item = &SurgeRecord> {
        SurgeCategory::ALL
            .into_iter()
            .flat_map(move |category| self.bucket(category).iter())
    }

    pub fn counts(&self) -> BTreeMap<SurgeCategory, usize> {
        SurgeCategory::ALL
            .into_iter()
            .map(|category| (category, self.bucket(category).len()))
            .collect()
    }

    /// Number of classified records (exclusions not counted).
    pub fn len(&self) -> usize {
        self.counts().values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn by_change_descending(a: &SurgeRecord, b: &SurgeRecord) -> Ordering {
    change(b)
        .total_cmp(&change(a))
        .then_with(|| a.code.cmp(&b.code))
}

fn by_change_ascending(a: &SurgeRecord, b: &SurgeRecord) -> Ordering {
    change(a)
        .total_cmp(&change(b))
        .then_with(|| a.code.cmp(&b.code))
}

fn change(record: &SurgeRecord) -> f64 {
    record.percent_change.unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surge::{classify, PeriodPair};

    fn codes(records: &[SurgeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.code.as_str()).collect()
    }

    #[test]
    fn buckets_are_ordered() {
        let report = classify(
            &[
                PeriodPair::new("A", 100.0, 250.0),
                PeriodPair::new("B", 100.0, 400.0),
                PeriodPair::new("C", 100.0, 40.0),
                PeriodPair::new("D", 100.0, 10.0),
                PeriodPair::new("E", 0.0, 5.0),
                PeriodPair::new("F", 0.0, 50.0),
                PeriodPair::new("G", 100.0, 105.0),
                PeriodPair::new("H", 100.0, 105.0),
            ],
            &SurgeThresholds::issue_momentum(),
        );

        assert_eq!(codes(&report.surging), vec!["B", "A"]);
        assert_eq!(codes(&report.declining), vec!["D", "C"]);
        assert_eq!(codes(&report.new_entrants), vec!["F", "E"]);
        assert_eq!(codes(&report.stable), vec!["G", "H"]);
        assert!(report.growing.is_empty());
    }

    #[test]
    fn counts_cover_every_category() {
        let report = classify(
            &[PeriodPair::new("A", 10.0, 13.0)],
            &SurgeThresholds::issue_momentum(),
        );
        let counts = report.counts();
        assert_eq!(counts.len(), 5);
        assert_eq!(counts[&SurgeCategory::Growing], 1);
        assert_eq!(report.len(), 1);
        assert_eq!(report.records().count(), 1);
    }

    #[test]
    fn empty_input_gives_empty_report() {
        let report = classify(&[], &SurgeThresholds::client_trajectory());
        assert!(report.is_empty());
        assert!(report.excluded.is_empty());
    }
}
