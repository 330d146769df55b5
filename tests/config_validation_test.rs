use indoc::indoc;
use lobbymap::config::{
    default_config_toml, load_config_from_path, parse_config, validate_config,
    validate_config_result, LobbymapConfig,
};
use lobbymap::{EntityKind, Error, InfluenceTier, Score0To100};
use pretty_assertions::assert_eq;
use stillwater::Validation;

#[test]
fn defaults_validate() {
    let methodology = validate_config_result(&LobbymapConfig::default()).unwrap();
    assert_eq!(methodology.version(), "2024.1");
    assert!(methodology.scheme_for(EntityKind::Client).is_ok());
    assert!(methodology.surge_thresholds("issue_momentum").is_ok());
    assert!(methodology.surge_thresholds("client_trajectory").is_ok());
}

#[test]
fn empty_file_means_defaults() {
    assert_eq!(parse_config("").unwrap(), LobbymapConfig::default());
}

#[test]
fn generated_default_file_parses_back() {
    let text = default_config_toml().unwrap();
    assert_eq!(parse_config(&text).unwrap(), LobbymapConfig::default());
}

#[test]
fn partial_file_overrides_only_what_it_names() {
    let config = parse_config(indoc! {r#"
        methodology_version = "2025.2"

        [tiers]
        extreme = 95

        [similarity]
        overlap = "jaccard"
    "#})
    .unwrap();

    assert_eq!(config.methodology_version, "2025.2");
    assert_eq!(config.tiers.extreme, 95);
    assert_eq!(config.tiers.high, 70);
    assert_eq!(config.similarity.top_k, 5);

    let methodology = validate_config_result(&config).unwrap();
    assert_eq!(methodology.ladder().classify(Score0To100::new(92)), InfluenceTier::High);
}

#[test]
fn custom_scheme_is_loaded() {
    let config = parse_config(indoc! {r#"
        [[schemes]]
        name = "spend_only"
        entity_kind = "firm"
        cohort_size = 50
        dimensions = [{ metric = "total_spend", weight = 1.0 }]
    "#})
    .unwrap();
    let methodology = validate_config_result(&config).unwrap();
    let scheme = methodology.scheme("spend_only").unwrap();
    assert_eq!(scheme.entity_kind(), EntityKind::Firm);
    assert_eq!(scheme.cohort_size(), Some(50));
    assert!(methodology.scheme("client_influence").is_err());
}

#[test]
fn every_problem_is_reported_at_once() {
    let config = parse_config(indoc! {r#"
        methodology_version = " "

        [tiers]
        extreme = 50
        high = 70
        moderate = 90

        [similarity]
        top_k = 0
        geography_bonus = -1.0

        [surge.quarterly]
        surging = 10.0
        growing = 20.0
        stable_floor = 0.0

        [[schemes]]
        name = "bad"
        entity_kind = "client"
        cohort_size = 0
        dimensions = [
            { metric = "total_spend", weight = 0.7 },
            { metric = "total_spend", weight = 0.7 },
        ]
    "#})
    .unwrap();

    let issues = match validate_config(&config) {
        Validation::Failure(issues) => issues.into_vec(),
        Validation::Success(_) => panic!("invalid configuration accepted"),
    };
    let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();

    assert!(fields.contains(&"methodology_version"));
    assert!(fields.iter().any(|f| f.starts_with("tiers")));
    assert!(fields.contains(&"similarity.top_k"));
    assert!(fields.contains(&"similarity.geography_bonus"));
    assert!(fields.contains(&"surge.quarterly"));
    assert!(fields.iter().any(|f| f.starts_with("schemes.bad")));
    assert!(issues
        .iter()
        .any(|i| i.message.contains("sum to 1.0")));
}

#[test]
fn configuration_errors_are_user_fixable() {
    let mut config = LobbymapConfig::default();
    config.similarity.top_k = 0;
    let err = validate_config_result(&config).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
    assert!(err.is_user_fixable());
    assert_eq!(err.issues().len(), 1);
}

#[test]
fn unreadable_and_malformed_files_name_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(load_config_from_path(&missing)
        .unwrap_err()
        .to_string()
        .contains("absent.toml"));

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "[tiers\nextreme = ").unwrap();
    assert!(load_config_from_path(&broken)
        .unwrap_err()
        .to_string()
        .contains("broken.toml"));
}
