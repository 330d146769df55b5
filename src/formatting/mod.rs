use colored::*;
use std::env;
use std::io::IsTerminal;

use crate::scoring::InfluenceTier;
use crate::surge::SurgeCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto, // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    /// Honors `NO_COLOR`, `CLICOLOR=0` and `CLICOLOR_FORCE=1` when in auto mode.
    pub fn from_env(self) -> Self {
        if self != Self::Auto {
            return self;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|val| val == "1") {
            return Self::Always;
        }
        if env::var("NO_COLOR").is_ok() || env::var("CLICOLOR").is_ok_and(|val| val == "0") {
            return Self::Never;
        }
        self
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }

    /// Apply this mode to the global `colored` switch.
    pub fn apply(&self) {
        colored::control::set_override(self.should_use_color());
    }
}

fn detect_color_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}

pub fn tier_color(tier: InfluenceTier) -> Color {
    match tier {
        InfluenceTier::Extreme => Color::Red,
        InfluenceTier::High => Color::Yellow,
        InfluenceTier::Moderate => Color::Cyan,
        InfluenceTier::Low => Color::White,
    }
}

pub fn surge_color(category: SurgeCategory) -> Color {
    match category {
        SurgeCategory::Surging => Color::Red,
        SurgeCategory::Growing => Color::Yellow,
        SurgeCategory::Stable => Color::White,
        SurgeCategory::Declining => Color::Blue,
        SurgeCategory::NewEntrant => Color::Magenta,
    }
}

/// Whole dollars with thousands separators: `1234567.8` -> `$1,234,568`.
pub fn format_dollars(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Signed percent with one decimal, or `n/a` when undefined.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.1}%", v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_color_modes() {
        assert_eq!(ColorMode::parse("ALWAYS"), Some(ColorMode::Always));
        assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
        assert_eq!(ColorMode::parse("sometimes"), None);
    }

    #[test]
    fn explicit_modes_ignore_environment() {
        assert!(ColorMode::Always.from_env().should_use_color());
        assert!(!ColorMode::Never.from_env().should_use_color());
    }

    #[test]
    fn dollars_are_grouped() {
        assert_eq!(format_dollars(0.0), "$0");
        assert_eq!(format_dollars(999.4), "$999");
        assert_eq!(format_dollars(1_234_567.8), "$1,234,568");
        assert_eq!(format_dollars(-1500.0), "-$1,500");
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(Some(150.0)), "+150.0%");
        assert_eq!(format_percent(Some(-12.345)), "-12.3%");
        assert_eq!(format_percent(None), "n/a");
    }
}
