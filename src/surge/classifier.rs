use super::report::SurgeReport;
use super::thresholds::SurgeThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info_span};

/// Raw two-period input for one issue or entity.
///
/// Field names accept both snake_case and the camelCase spelling found in
/// older dataset exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodPair {
    #[serde(alias = "issueCode", alias = "id")]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "currentValue")]
    pub current_value: Option<f64>,
    #[serde(default, alias = "currentCount")]
    pub current_count: Option<u64>,
    #[serde(default, alias = "priorValue")]
    pub prior_value: Option<f64>,
    #[serde(default, alias = "priorCount")]
    pub prior_count: Option<u64>,
}

impl PeriodPair {
    pub fn new(code: impl Into<String>, prior_value: f64, current_value: f64) -> Self {
        Self {
            code: code.into(),
            name: None,
            current_value: Some(current_value),
            current_count: None,
            prior_value: Some(prior_value),
            prior_count: None,
        }
    }

    pub fn with_counts(mut self, prior_count: u64, current_count: u64) -> Self {
        self.prior_count = Some(prior_count);
        self.current_count = Some(current_count);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Momentum bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurgeCategory {
    Surging,
    Growing,
    Stable,
    Declining,
    /// Zero prior activity, nonzero current activity
    NewEntrant,
}

impl SurgeCategory {
    pub const ALL: [SurgeCategory; 5] = [
        SurgeCategory::Surging,
        SurgeCategory::Growing,
        SurgeCategory::Stable,
        SurgeCategory::Declining,
        SurgeCategory::NewEntrant,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SurgeCategory::Surging => "surging",
            SurgeCategory::Growing => "growing",
            SurgeCategory::Stable => "stable",
            SurgeCategory::Declining => "declining",
            SurgeCategory::NewEntrant => "new-entrant",
        }
    }
}

impl fmt::Display for SurgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A classified record: raw endpoints plus everything derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurgeRecord {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub current_value: f64,
    pub current_count: Option<u64>,
    pub prior_value: f64,
    pub prior_count: Option<u64>,
    /// `None` for new entrants
    pub percent_change: Option<f64>,
    /// `None` when either count is absent or the prior count is 0
    pub count_percent_change: Option<f64>,
    pub category: SurgeCategory,
}

/// Why a record was left out of the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    MissingCurrent,
    MissingPrior,
    /// Negative or non-finite value
    InvalidValue,
    /// Zero in both periods
    NoActivity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExcludedRecord {
    pub code: String,
    pub reason: ExclusionReason,
}

/// `(current - prior) / prior * 100`, or `None` from a zero base.
pub fn percent_change(prior: f64, current: f64) -> Option<f64> {
    (prior != 0.0).then(|| (current - prior) / prior * 100.0)
}

fn count_change(prior: Option<u64>, current: Option<u64>) -> Option<f64> {
    let (prior, current) = (prior? as f64, current? as f64);
    percent_change(prior, current)
}

/// Classify one record, or say why it cannot be classified.
pub fn classify_record(
    pair: &PeriodPair,
    thresholds: &SurgeThresholds,
) -> Result<SurgeRecord, ExclusionReason> {
    let current = pair.current_value.ok_or(ExclusionReason::MissingCurrent)?;
    let prior = pair.prior_value.ok_or(ExclusionReason::MissingPrior)?;
    if !(current.is_finite() && prior.is_finite()) || current < 0.0 || prior < 0.0 {
        return Err(ExclusionReason::InvalidValue);
    }

    let (percent_change, category) = match percent_change(prior, current) {
        Some(change) => (Some(change), thresholds.categorize(change)),
        None if current > 0.0 => (None, SurgeCategory::NewEntrant),
        None => return Err(ExclusionReason::NoActivity),
    };

    Ok(SurgeRecord {
        code: pair.code.clone(),
        name: pair.name.clone(),
        current_value: current,
        current_count: pair.current_count,
        prior_value: prior,
        prior_count: pair.prior_count,
        percent_change,
        count_percent_change: count_change(pair.prior_count, pair.current_count),
        category,
    })
}

/// Classify a batch. Incomplete records are excluded, never fatal.
pub fn classify(records: &[PeriodPair], thresholds: &SurgeThresholds) -> SurgeReport {
    let _span = info_span!("classify_surge", records = records.len()).entered();

    let mut classified = Vec::with_capacity(records.len());
    let mut excluded = Vec::new();
    for pair in records {
        match classify_record(pair, thresholds) {
            Ok(record) => classified.push(record),
            Err(reason) => {
                debug!(code = %pair.code, ?reason, "surge record excluded");
                excluded.push(ExcludedRecord {
                    code: pair.code.clone(),
                    reason,
                });
            }
        }
    }

    SurgeReport::new(*thresholds, classified, excluded)
}
