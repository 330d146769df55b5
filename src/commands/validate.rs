use crate::config::{load_config, validate_config, LobbymapConfig, Methodology};
use crate::errors::ConfigIssue;
use anyhow::Result;
use colored::*;
use std::path::Path;
use stillwater::Validation;

/// Validate the configuration and print every issue found.
pub fn validate_config_file(config: Option<&Path>) -> Result<()> {
    let raw = load_config(config)?;
    match check(&raw) {
        Ok(methodology) => {
            println!("{} {}", "✓".green(), describe(&methodology));
            Ok(())
        }
        Err(issues) => {
            eprintln!("{} configuration is invalid:", "✗".red());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
            anyhow::bail!("{} configuration issue(s) found", issues.len())
        }
    }
}

fn check(raw: &LobbymapConfig) -> std::result::Result<Methodology, Vec<ConfigIssue>> {
    match validate_config(raw) {
        Validation::Success(methodology) => Ok(methodology),
        Validation::Failure(issues) => Err(issues.into_vec()),
    }
}

fn describe(methodology: &Methodology) -> String {
    let schemes: Vec<&str> = methodology.schemes().iter().map(|s| s.name()).collect();
    let contexts: Vec<&str> = methodology.surge_contexts().collect();
    format!(
        "methodology {} is valid: schemes [{}], surge contexts [{}]",
        methodology.version(),
        schemes.join(", "),
        contexts.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use indoc::indoc;

    #[test]
    fn default_configuration_is_described() {
        let methodology = check(&LobbymapConfig::default()).unwrap();
        let text = describe(&methodology);
        assert!(text.contains("client_influence"));
        assert!(text.contains("issue_momentum"));
    }

    #[test]
    fn all_issues_are_collected() {
        let raw = parse_config(indoc! {r#"
            [tiers]
            extreme = 60
            high = 70

            [similarity]
            top_k = 0
        "#})
        .unwrap();
        let issues = check(&raw).unwrap_err();
        assert!(issues.iter().any(|i| i.field.starts_with("tiers")));
        assert!(issues.iter().any(|i| i.field == "similarity.top_k"));
    }
}
