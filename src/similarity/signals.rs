use crate::core::ScorableEntity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How shared issue codes are turned into a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapMode {
    /// One point per shared code, regardless of how common the code is
    #[default]
    Count,
    /// `|shared| / |union|`, in [0, 1]
    Jaccard,
}

/// One reason a candidate was considered similar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum MatchFactor {
    SameGeography { state: String, weight: f64 },
    SharedIssues { codes: Vec<String>, weight: f64 },
}

impl MatchFactor {
    pub fn weight(&self) -> f64 {
        match self {
            MatchFactor::SameGeography { weight, .. } | MatchFactor::SharedIssues { weight, .. } => {
                *weight
            }
        }
    }
}

/// Exact geography match. Absent geography never matches.
///
/// Codes are compared as given; the dataset loader upper-cases them.
pub fn geography_signal(
    target: &ScorableEntity,
    candidate: &ScorableEntity,
    bonus: f64,
) -> Option<MatchFactor> {
    let (ours, theirs) = (target.geography()?, candidate.geography()?);
    (bonus > 0.0 && ours == theirs).then(|| MatchFactor::SameGeography {
        state: ours.to_string(),
        weight: bonus,
    })
}

/// Shared issue codes between target and candidate, if any.
pub fn issue_overlap_signal(
    target: &ScorableEntity,
    candidate: &ScorableEntity,
    mode: OverlapMode,
) -> Option<MatchFactor> {
    let shared: BTreeSet<&String> = target.issues.intersection(&candidate.issues).collect();
    if shared.is_empty() {
        return None;
    }

    let weight = match mode {
        OverlapMode::Count => shared.len() as f64,
        OverlapMode::Jaccard => {
            let union = target.issues.union(&candidate.issues).count();
            shared.len() as f64 / union as f64
        }
    };

    Some(MatchFactor::SharedIssues {
        codes: shared.into_iter().cloned().collect(),
        weight,
    })
}
