use super::classifier::SurgeCategory;
use crate::errors::{ConfigIssue, Error, Result};
use serde::Serialize;

/// Percent-change cutoffs for one presentation context.
///
/// Evaluated most extreme first; a change equal to a cutoff belongs to the
/// higher bucket:
///
/// - `change >= surging` → surging
/// - `change >= growing` → growing
/// - `change >= stable_floor` → stable
/// - otherwise → declining
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurgeThresholds {
    surging: f64,
    growing: f64,
    stable_floor: f64,
}

impl SurgeThresholds {
    pub fn new(surging: f64, growing: f64, stable_floor: f64) -> Result<Self> {
        let issues = Self::check("surge", surging, growing, stable_floor);
        if !issues.is_empty() {
            return Err(Error::Configuration(issues));
        }
        Ok(Self {
            surging,
            growing,
            stable_floor,
        })
    }

    /// Pure invariant check; returns every issue found under `field`.
    pub fn check(field: &str, surging: f64, growing: f64, stable_floor: f64) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        for (name, value) in [
            ("surging", surging),
            ("growing", growing),
            ("stable_floor", stable_floor),
        ] {
            if !value.is_finite() {
                issues.push(ConfigIssue::new(
                    format!("{}.{}", field, name),
                    format!("threshold must be a finite number, got {}", value),
                ));
            }
        }
        if issues.is_empty() && !(surging > growing && growing > stable_floor) {
            issues.push(ConfigIssue::new(
                field,
                format!(
                    "thresholds must be strictly descending (surging > growing > stable_floor), got {} / {} / {}",
                    surging, growing, stable_floor
                ),
            ));
        }
        issues
    }

    /// Quarterly issue-momentum view: >=100% surging, >=25% growing, >=-25% stable.
    pub fn issue_momentum() -> Self {
        Self {
            surging: 100.0,
            growing: 25.0,
            stable_floor: -25.0,
        }
    }

    /// Client trajectory view: >=50% surging, >=10% growing, >=-10% stable.
    pub fn client_trajectory() -> Self {
        Self {
            surging: 50.0,
            growing: 10.0,
            stable_floor: -10.0,
        }
    }

    pub fn surging(&self) -> f64 {
        self.surging
    }

    pub fn growing(&self) -> f64 {
        self.growing
    }

    pub fn stable_floor(&self) -> f64 {
        self.stable_floor
    }

    /// Bucket a finite percent change. Never returns `NewEntrant`.
    pub fn categorize(&self, percent_change: f64) -> SurgeCategory {
        if percent_change >= self.surging {
            SurgeCategory::Surging
        } else if percent_change >= self.growing {
            SurgeCategory::Growing
        } else if percent_change >= self.stable_floor {
            SurgeCategory::Stable
        } else {
            SurgeCategory::Declining
        }
    }
}

impl Default for SurgeThresholds {
    fn default() -> Self {
        Self::issue_momentum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_boundaries_belong_to_higher_bucket() {
        let t = SurgeThresholds::issue_momentum();
        assert_eq!(t.categorize(100.0), SurgeCategory::Surging);
        assert_eq!(t.categorize(99.9), SurgeCategory::Growing);
        assert_eq!(t.categorize(25.0), SurgeCategory::Growing);
        assert_eq!(t.categorize(24.9), SurgeCategory::Stable);
        assert_eq!(t.categorize(-25.0), SurgeCategory::Stable);
        assert_eq!(t.categorize(-25.1), SurgeCategory::Declining);
        assert_eq!(t.categorize(-100.0), SurgeCategory::Declining);
    }

    #[test]
    fn same_change_classifies_differently_per_context() {
        let change = 60.0;
        assert_eq!(
            SurgeThresholds::issue_momentum().categorize(change),
            SurgeCategory::Growing
        );
        assert_eq!(
            SurgeThresholds::client_trajectory().categorize(change),
            SurgeCategory::Surging
        );
    }

    #[test]
    fn unordered_thresholds_are_rejected() {
        assert!(SurgeThresholds::new(25.0, 100.0, -25.0).is_err());
        assert!(SurgeThresholds::new(100.0, 25.0, 25.0).is_err());
        assert!(SurgeThresholds::new(f64::NAN, 25.0, -25.0).is_err());
        assert!(SurgeThresholds::new(200.0, 50.0, -50.0).is_ok());
    }

    #[test]
    fn presets_are_valid() {
        for t in [
            SurgeThresholds::issue_momentum(),
            SurgeThresholds::client_trajectory(),
        ] {
            assert!(SurgeThresholds::check("preset", t.surging(), t.growing(), t.stable_floor()).is_empty());
        }
    }
}
