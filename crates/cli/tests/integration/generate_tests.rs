//! Generate command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn generate_expands_wildcard_inputs() {
  let env = TestEnv::from_fixture("valid.json");
  env.write_file("src/b.js", "");
  env.write_file("src/a.js", "");
  env.write_file("src/notes.md", "");

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .assert()
    .success()
    .stdout(predicate::str::contains("Generated build.ninja"));

  let ninja = env.read_file("build.ninja");
  assert!(ninja.contains("uglify_flags = --mangle --compress\n"));
  assert!(ninja.contains("rule uglifyjs\n  command = uglifyjs $in --output $out ${uglify_flags}\n"));
  assert!(ninja.contains("build build/app.min.js: uglifyjs src/a.js src/b.js\n"));
  assert!(ninja.contains("build clean: clean\n"));
  assert!(ninja.contains("default build/app.min.js\n"));
  assert!(ninja.contains("build all: phony build/app.min.js\n"));
}

#[test]
fn generate_is_byte_identical_across_runs() {
  let env = TestEnv::from_fixture("valid.json");
  env.write_file("src/a.js", "");

  env.nodja_cmd().arg("generate").arg(&env.config_path).assert().success();
  let first = env.read_file("build.ninja");

  env.nodja_cmd().arg("generate").arg(&env.config_path).assert().success();
  let second = env.read_file("build.ninja");

  assert_eq!(first, second);
}

#[test]
fn generate_json_summary() {
  let env = TestEnv::from_fixture("valid.json");

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .arg("--output-format")
    .arg("json")
    .assert()
    .success()
    .stdout(predicate::str::contains("\"build_statements\": 2"))
    .stdout(predicate::str::contains("\"phony_aliases\": 1"));
}

#[test]
fn generate_warns_when_wildcard_matches_nothing() {
  let env = TestEnv::from_fixture("valid.json");

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .assert()
    .success()
    .stderr(predicate::str::contains("glob matched no files"));

  assert!(env.read_file("build.ninja").contains("build build/app.min.js: uglifyjs\n"));
}

#[test]
fn generate_schema_violation_aborts() {
  let env = TestEnv::from_fixture("build_statements_object.json");

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("build_statements entry must be an array"))
    .stderr(predicate::str::contains("An error occurred! Aborting."));

  assert!(!env.temp.path().join("build.ninja").exists());
}

#[test]
fn generate_requires_set_choice_when_ambiguous() {
  let env = TestEnv::from_fixture("sets.json");

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .assert()
    .failure()
    .stderr(predicate::str::contains("choose one with --variable-set"));
}

#[test]
fn generate_with_selected_variable_set() {
  let env = TestEnv::from_fixture("sets.json");

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .arg("--variable-set")
    .arg("release")
    .assert()
    .success();

  let ninja = env.read_file("build.ninja");
  assert!(ninja.contains("cflags = -O2 -DNDEBUG\n"));
  assert!(ninja.contains("build main.o: cc main.c | config.h\n"));
}

#[test]
fn generate_unknown_variable_set_fails() {
  let env = TestEnv::from_fixture("sets.json");

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .arg("--variable-set")
    .arg("profile")
    .assert()
    .failure()
    .stderr(predicate::str::contains("No variable set named 'profile' (available: debug, release)"));
}

#[test]
fn generate_with_custom_template() {
  let env = TestEnv::from_fixture("valid.json");
  env.write_file(
    "layout.ninja",
    "ninja_required_version = 1.10\n{{variables}}\n{{rules}}\n{{build_statements}}\n{{defaults}}\n{{phony_aliases}}\n",
  );

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .arg("--template")
    .arg("layout.ninja")
    .assert()
    .success();

  assert!(env.read_file("build.ninja").starts_with("ninja_required_version = 1.10\nuglify_flags"));
}

#[test]
fn generate_unwritable_output_fails() {
  let env = TestEnv::from_fixture("valid.json");

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .arg("--output")
    .arg("missing-dir/build.ninja")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Could not write to 'missing-dir/build.ninja'"));
}

#[test]
fn run_reports_missing_ninja() {
  let env = TestEnv::from_fixture("valid.json");

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .arg("--run")
    .arg("--ninja")
    .arg("nodja-test-missing-ninja")
    .assert()
    .failure()
    .stderr(predicate::str::contains("nodja-test-missing-ninja binary not found"));

  // The build file is written before the executor is looked up.
  assert!(env.temp.path().join("build.ninja").exists());
}

#[cfg(unix)]
#[test]
fn run_propagates_executor_exit_code() {
  let env = TestEnv::from_fixture("valid.json");

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .arg("--run")
    .env("NODJA_NINJA", "true")
    .assert()
    .success();

  env
    .nodja_cmd()
    .arg("generate")
    .arg(&env.config_path)
    .arg("--run")
    .env("NODJA_NINJA", "false")
    .assert()
    .code(1);
}
