use super::Metric;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Opaque, stable identifier of an entity within its dataset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The kinds of entity published in the disclosure dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Client,
    Firm,
    Lobbyist,
    Issue,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Client,
        EntityKind::Firm,
        EntityKind::Lobbyist,
        EntityKind::Issue,
    ];

    /// Dataset key under which records of this kind are published.
    pub fn dataset_key(self) -> &'static str {
        match self {
            EntityKind::Client => "clients",
            EntityKind::Firm => "firms",
            EntityKind::Lobbyist => "lobbyists",
            EntityKind::Issue => "issues",
        }
    }

    fn singular(self) -> &'static str {
        match self {
            EntityKind::Client => "client",
            EntityKind::Firm => "firm",
            EntityKind::Lobbyist => "lobbyist",
            EntityKind::Issue => "issue",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.singular() == wanted || kind.dataset_key() == wanted)
            .ok_or_else(|| format!("unknown entity kind '{}'", s))
    }
}

/// An immutable input record: identity, raw metrics and the categorical
/// attributes used for similarity ranking.
///
/// Missing metrics are not an error; [`ScorableEntity::metric`] reads them as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorableEntity {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    #[serde(default)]
    pub metrics: BTreeMap<Metric, f64>,
    /// Two-letter state or other geography code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Policy issue codes lobbied on
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub issues: BTreeSet<String>,
}

impl ScorableEntity {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            metrics: BTreeMap::new(),
            state: None,
            issues: BTreeSet::new(),
        }
    }

    pub fn with_metric(mut self, metric: Metric, value: f64) -> Self {
        self.metrics.insert(metric, value);
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_issues<I, S>(mut self, issues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.issues.extend(issues.into_iter().map(Into::into));
        self
    }

    /// Metric value used for scoring and ranking.
    ///
    /// Absent, negative and non-finite values all read as 0.
    pub fn metric(&self, metric: Metric) -> f64 {
        self.metrics
            .get(&metric)
            .copied()
            .filter(|value| value.is_finite() && *value > 0.0)
            .unwrap_or(0.0)
    }

    pub fn has_metric(&self, metric: Metric) -> bool {
        self.metrics.contains_key(&metric)
    }

    /// Geography code; an empty code reads as absent.
    pub fn geography(&self) -> Option<&str> {
        self.state.as_deref().filter(|state| !state.is_empty())
    }
}
