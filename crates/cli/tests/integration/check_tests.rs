//! Check command integration tests.

use predicates::prelude::*;

use super::common::{TestEnv, fixture_path};

// =============================================================================
// Text output
// =============================================================================

#[test]
fn check_accepts_valid_fixtures() {
  for fixture in ["valid.json", "sets.json"] {
    let env = TestEnv::from_fixture(fixture);

    env
      .nodja_cmd()
      .arg("check")
      .arg(fixture_path(fixture))
      .assert()
      .success()
      .stdout(predicate::str::contains("is a valid nodja config"));
  }
}

#[test]
fn check_reports_missing_file() {
  let env = TestEnv::from_fixture("valid.json");

  env
    .nodja_cmd()
    .arg("check")
    .arg("absent.json")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Could not read file 'absent.json'"));
}

#[test]
fn check_reports_malformed_document() {
  let env = TestEnv::from_fixture("malformed.json");

  env
    .nodja_cmd()
    .arg("check")
    .arg(&env.config_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Nodja configuration is malformed JSON"));
}

#[test]
fn check_reports_missing_variables() {
  let env = TestEnv::from_fixture("missing_variables.json");

  env
    .nodja_cmd()
    .arg("check")
    .arg(&env.config_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("must have either a 'variables' or 'variable_sets' entry"));
}

#[test]
fn check_reports_build_statements_object() {
  let env = TestEnv::from_fixture("build_statements_object.json");

  env
    .nodja_cmd()
    .arg("check")
    .arg(&env.config_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("build_statements entry must be an array"));
}

#[test]
fn check_reports_missing_rule_field() {
  let env = TestEnv::from_fixture("missing_rule_field.json");

  env
    .nodja_cmd()
    .arg("check")
    .arg(&env.config_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains(
      "Build statement at index 1 is missing required field 'rule'",
    ));
}

// =============================================================================
// JSON output
// =============================================================================

#[test]
fn check_json_valid() {
  let env = TestEnv::from_fixture("valid.json");

  env
    .nodja_cmd()
    .arg("check")
    .arg(&env.config_path)
    .arg("--output-format")
    .arg("json")
    .assert()
    .success()
    .stdout(predicate::str::contains("\"valid\": true"))
    .stdout(predicate::str::contains("\"kind\"").not());
}

#[test]
fn check_json_reports_kind_and_message() {
  let env = TestEnv::from_fixture("malformed.json");

  let output = env
    .nodja_cmd()
    .arg("check")
    .arg(&env.config_path)
    .arg("--output-format")
    .arg("json")
    .assert()
    .failure()
    .get_output()
    .stdout
    .clone();

  let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(report["valid"], false);
  assert_eq!(report["kind"], "malformed_document");
  assert!(
    report["message"]
      .as_str()
      .unwrap()
      .contains("malformed JSON")
  );
}
