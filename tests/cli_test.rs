mod common;

use assert_cmd::Command;
use common::write_files;
use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

const CLIENTS: &str = indoc! {r#"
    [
      { "id": "a", "name": "Alpha", "state": "TX", "total_spend": 100, "issue_count": 5, "issues": ["TAX", "ENG"] },
      { "id": "b", "name": "Beta", "state": "TX", "total_spend": 50, "issue_count": 1, "issues": ["TAX"] },
      { "id": "c", "name": "Gamma", "state": "CA", "total_spend": 0, "issue_count": 0 }
    ]
"#};

const SPEND_AND_ISSUES: &str = indoc! {r#"
    methodology_version = "test.1"

    [[schemes]]
    name = "spend_and_issues"
    entity_kind = "client"
    dimensions = [
        { metric = "total_spend", weight = 0.6 },
        { metric = "issue_count", weight = 0.4 },
    ]
"#};

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[
            ("clients.json", CLIENTS),
            (".lobbymap.toml", SPEND_AND_ISSUES),
            (
                "issue_momentum.json",
                r#"[{"code":"TAX","prior_value":100,"current_value":300},{"code":"NEW","prior_value":0,"current_value":5}]"#,
            ),
        ],
    );
    dir
}

fn lobbymap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lobbymap").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("LOBBYMAP_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn score_emits_stamped_json() {
    let dir = workspace();
    let json = json_stdout(lobbymap(&dir).args(["score", ".", "-f", "json"]));

    assert_eq!(json["methodology_version"], "test.1");
    assert_eq!(json["scheme"], "spend_and_issues");
    let rows: Vec<(String, u64, String)> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["entity"]["id"].as_str().unwrap().to_string(),
                e["composite"].as_u64().unwrap(),
                e["tier"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("a".to_string(), 100, "extreme".to_string()),
            ("b".to_string(), 70, "high".to_string()),
            ("c".to_string(), 0, "low".to_string()),
        ]
    );
}

#[test]
fn top_limits_displayed_rows_only() {
    let dir = workspace();
    let json = json_stdout(lobbymap(&dir).args(["score", ".", "-f", "json", "--top", "1"]));
    assert_eq!(json["entries"].as_array().unwrap().len(), 1);
    assert_eq!(json["cohort_size"], 3);
}

#[test]
fn similar_for_one_target() {
    let dir = workspace();
    let json = json_stdout(lobbymap(&dir).args(["similar", ".", "-e", "a", "-f", "json"]));
    let similar = json["results"][0]["similar"].as_array().unwrap();
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0]["entity"]["id"], "b");
    assert_eq!(similar[0]["score"], 3.0);
}

#[test]
fn similar_with_unknown_target_fails() {
    let dir = workspace();
    let output = lobbymap(&dir)
        .args(["similar", ".", "-e", "nobody"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nobody"));
}

#[test]
fn surge_reads_context_dataset_from_directory() {
    let dir = workspace();
    let json = json_stdout(lobbymap(&dir).args(["surge", ".", "-f", "json"]));
    assert_eq!(json["context"], "issue_momentum");
    assert_eq!(json["surging"][0]["code"], "TAX");
    assert_eq!(json["surging"][0]["percent_change"], 200.0);
    assert_eq!(json["new_entrants"][0]["code"], "NEW");
}

#[test]
fn markdown_output_to_file() {
    let dir = workspace();
    let output = lobbymap(&dir)
        .args(["score", ".", "-f", "markdown", "-o", "report.md"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report = std::fs::read_to_string(dir.path().join("report.md")).unwrap();
    assert!(report.contains("test.1"));
    assert!(report.contains("Alpha"));
}

#[test]
fn terminal_output_is_the_default() {
    let dir = workspace();
    let output = lobbymap(&dir).args(["score", "."]).output().unwrap();
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Alpha"));
    assert!(text.contains("test.1"));
}

#[test]
fn invalid_config_stops_before_reading_data() {
    let dir = tempfile::tempdir().unwrap();
    write_files(
        dir.path(),
        &[(".lobbymap.toml", "[tiers]\nextreme = 10\nhigh = 70\n")],
    );
    let output = lobbymap(&dir)
        .args(["score", "no-such-dir"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("tiers"), "stderr: {}", stderr);
}

#[test]
fn validate_config_reports_success_and_failure() {
    let dir = workspace();
    let output = lobbymap(&dir).arg("validate-config").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("spend_and_issues"));

    let broken = tempfile::tempdir().unwrap();
    write_files(
        broken.path(),
        &[(".lobbymap.toml", "[similarity]\ntop_k = 0\n")],
    );
    let output = lobbymap(&broken).arg("validate-config").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("similarity.top_k"));
}

#[test]
fn init_writes_a_loadable_config() {
    let dir = tempfile::tempdir().unwrap();
    let output = lobbymap(&dir).arg("init").output().unwrap();
    assert!(output.status.success());
    assert!(dir.path().join(".lobbymap.toml").is_file());

    let again = lobbymap(&dir).arg("init").output().unwrap();
    assert!(!again.status.success());

    let check = lobbymap(&dir).arg("validate-config").output().unwrap();
    assert!(check.status.success());
}
