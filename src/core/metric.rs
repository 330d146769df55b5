use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw numeric metrics carried by a [`ScorableEntity`](super::ScorableEntity).
///
/// The variant order is the canonical display order; maps keyed by `Metric`
/// iterate in this order, which keeps serialized output stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Total reported lobbying spend (or income, for firms) in dollars
    TotalSpend,
    /// Number of disclosure filings
    FilingCount,
    /// Number of distinct issue codes lobbied on
    IssueCount,
    /// Years with at least one filing
    YearsActive,
    /// Lobbyists with prior government service
    RevolvingDoorCount,
    /// Distinct lobbyists engaged
    LobbyistCount,
    /// Distinct clients represented
    ClientCount,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::TotalSpend,
        Metric::FilingCount,
        Metric::IssueCount,
        Metric::YearsActive,
        Metric::RevolvingDoorCount,
        Metric::LobbyistCount,
        Metric::ClientCount,
    ];

    /// Stable machine key, identical to the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            Metric::TotalSpend => "total_spend",
            Metric::FilingCount => "filing_count",
            Metric::IssueCount => "issue_count",
            Metric::YearsActive => "years_active",
            Metric::RevolvingDoorCount => "revolving_door_count",
            Metric::LobbyistCount => "lobbyist_count",
            Metric::ClientCount => "client_count",
        }
    }

    /// Short human label for tables.
    pub fn label(self) -> &'static str {
        match self {
            Metric::TotalSpend => "Spend",
            Metric::FilingCount => "Filings",
            Metric::IssueCount => "Issues",
            Metric::YearsActive => "Longevity",
            Metric::RevolvingDoorCount => "Revolving door",
            Metric::LobbyistCount => "Lobbyists",
            Metric::ClientCount => "Clients",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Metric::ALL
            .into_iter()
            .find(|metric| metric.key() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Metric::ALL.iter().map(|m| m.key()).collect();
                format!("unknown metric '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}
