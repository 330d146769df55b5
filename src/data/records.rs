//! Raw dataset records and their normalization into [`ScorableEntity`].
//!
//! Dataset exports have drifted over time: camelCase and snake_case keys,
//! `slug` instead of `id`, numeric ids, dollar amounts written as strings.
//! All of that is absorbed here, for entity records and period pairs alike.

use crate::core::{EntityId, EntityKind, Metric, ScorableEntity};
use crate::surge::PeriodPair;
use serde::Deserialize;
use std::fmt;

/// An id that may be published as a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Integer(i64),
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Text(text) => f.write_str(text.trim()),
            RawId::Integer(n) => write!(f, "{}", n),
        }
    }
}

/// A metric that may be published as a number or a formatted string
/// such as `"$1,200,000"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
    /// Anything else (`true`, an object, ...); never a number
    Other(serde_json::Value),
}

impl RawNumber {
    /// Numeric value, or `None` when the text is not a number.
    pub fn value(&self) -> Option<f64> {
        match self {
            RawNumber::Number(n) => Some(*n),
            RawNumber::Text(text) => {
                let cleaned: String = text
                    .trim()
                    .chars()
                    .filter(|c| !matches!(c, '$' | ',' | '_'))
                    .collect();
                cleaned.parse().ok()
            }
            RawNumber::Other(_) => None,
        }
    }

    /// Whole, non-negative value, accepting `3.0` as `3`.
    pub fn count(&self) -> Option<u64> {
        self.value()
            .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
            .map(|n| n as u64)
    }
}

/// One entity as published, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEntityRecord {
    #[serde(
        default,
        alias = "slug",
        alias = "entityId",
        alias = "entity_id",
        alias = "clientId",
        alias = "firmId",
        alias = "lobbyistId"
    )]
    pub id: Option<RawId>,
    #[serde(default, alias = "displayName", alias = "display_name", alias = "title")]
    pub name: Option<String>,
    #[serde(default, alias = "stateCode", alias = "state_code", alias = "geography")]
    pub state: Option<String>,
    #[serde(default, alias = "issueCodes", alias = "issue_codes", alias = "topIssues")]
    pub issues: Option<Vec<String>>,

    #[serde(
        default,
        alias = "totalSpend",
        alias = "spend",
        alias = "totalIncome",
        alias = "total_income",
        alias = "income"
    )]
    pub total_spend: Option<RawNumber>,
    #[serde(default, alias = "filingCount", alias = "filings")]
    pub filing_count: Option<RawNumber>,
    #[serde(default, alias = "issueCount", alias = "numIssues")]
    pub issue_count: Option<RawNumber>,
    #[serde(default, alias = "yearsActive", alias = "years")]
    pub years_active: Option<RawNumber>,
    #[serde(
        default,
        alias = "revolvingDoorCount",
        alias = "revolving_door",
        alias = "revolvingDoor"
    )]
    pub revolving_door_count: Option<RawNumber>,
    #[serde(default, alias = "lobbyistCount", alias = "lobbyists", alias = "numLobbyists")]
    pub lobbyist_count: Option<RawNumber>,
    #[serde(default, alias = "clientCount", alias = "clients", alias = "numClients")]
    pub client_count: Option<RawNumber>,
}

impl RawEntityRecord {
    fn raw_metric(&self, metric: Metric) -> Option<&RawNumber> {
        match metric {
            Metric::TotalSpend => self.total_spend.as_ref(),
            Metric::FilingCount => self.filing_count.as_ref(),
            Metric::IssueCount => self.issue_count.as_ref(),
            Metric::YearsActive => self.years_active.as_ref(),
            Metric::RevolvingDoorCount => self.revolving_door_count.as_ref(),
            Metric::LobbyistCount => self.lobbyist_count.as_ref(),
            Metric::ClientCount => self.client_count.as_ref(),
        }
    }

    /// Normalize into the fixed entity shape.
    ///
    /// Returns `None` for records without a usable id. Unparseable metrics
    /// are dropped and later read as 0. When no issue count is published it
    /// is derived from the issue list.
    pub fn into_entity(self, kind: EntityKind) -> Option<ScorableEntity> {
        let id = self
            .id
            .as_ref()
            .map(ToString::to_string)
            .filter(|id| !id.is_empty())?;
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&id)
            .to_string();

        let mut entity = ScorableEntity::new(EntityId::new(id.clone()), name, kind);
        for metric in Metric::ALL {
            match self.raw_metric(metric).map(RawNumber::value) {
                Some(Some(value)) => entity = entity.with_metric(metric, value),
                Some(None) => {
                    tracing::debug!(%id, %metric, "unparseable metric value, treating as missing")
                }
                None => {}
            }
        }

        let issues: Vec<String> = self
            .issues
            .unwrap_or_default()
            .into_iter()
            .map(|code| code.trim().to_ascii_uppercase())
            .filter(|code| !code.is_empty())
            .collect();
        entity = entity.with_issues(issues);
        if !entity.has_metric(Metric::IssueCount) && !entity.issues.is_empty() {
            let derived = entity.issues.len() as f64;
            entity = entity.with_metric(Metric::IssueCount, derived);
        }

        let state = self.state.as_deref().map(str::trim).unwrap_or_default();
        if !state.is_empty() {
            entity = entity.with_state(state.to_ascii_uppercase());
        }
        Some(entity)
    }
}

/// One period pair as published, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawPeriodPair {
    #[serde(
        default,
        alias = "issueCode",
        alias = "issue_code",
        alias = "id",
        alias = "slug"
    )]
    pub code: Option<RawId>,
    #[serde(default, alias = "displayName", alias = "display_name", alias = "title")]
    pub name: Option<String>,
    #[serde(default, alias = "currentValue", alias = "currentSpend", alias = "current_spend")]
    pub current_value: Option<RawNumber>,
    #[serde(default, alias = "currentCount", alias = "currentFilings")]
    pub current_count: Option<RawNumber>,
    #[serde(default, alias = "priorValue", alias = "priorSpend", alias = "prior_spend")]
    pub prior_value: Option<RawNumber>,
    #[serde(default, alias = "priorCount", alias = "priorFilings")]
    pub prior_count: Option<RawNumber>,
}

impl RawPeriodPair {
    /// Normalize into a [`PeriodPair`].
    ///
    /// Returns `None` without a usable code. A value that does not parse
    /// becomes absent, so the classifier excludes the record instead of the
    /// whole file failing to load.
    pub fn into_period_pair(self) -> Option<PeriodPair> {
        let code = self
            .code
            .as_ref()
            .map(ToString::to_string)
            .filter(|code| !code.is_empty())?;

        let value = |field: &'static str, raw: Option<RawNumber>| {
            let raw = raw?;
            let parsed = raw.value();
            if parsed.is_none() {
                tracing::debug!(%code, field, "unparseable period value, treating as missing");
            }
            parsed
        };
        let current_value = value("current_value", self.current_value);
        let prior_value = value("prior_value", self.prior_value);

        Some(PeriodPair {
            name: self
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            current_value,
            current_count: self.current_count.as_ref().and_then(RawNumber::count),
            prior_value,
            prior_count: self.prior_count.as_ref().and_then(RawNumber::count),
            code,
        })
    }
}
