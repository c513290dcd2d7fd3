//! Configuration validation.
//!
//! Validation is fail-fast: checks run in a fixed order (file, JSON syntax,
//! variables, rules, build statements) and the first violated constraint is
//! returned as a [`ValidationError`]. Nothing after the first failure is
//! checked, so callers always get one precise message rather than a list.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
  /// The config file is missing or unreadable.
  NotFound,
  /// The content is not valid JSON.
  MalformedDocument,
  /// A structural or type constraint is violated.
  SchemaViolation,
}

/// A validation failure with its category and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
  pub kind: ValidationErrorKind,
  pub message: String,
}

impl ValidationError {
  fn not_found(path: &Path) -> Self {
    Self {
      kind: ValidationErrorKind::NotFound,
      message: format!("Could not read file '{}'", path.display()),
    }
  }

  fn malformed() -> Self {
    Self {
      kind: ValidationErrorKind::MalformedDocument,
      message: "Nodja configuration is malformed JSON".to_string(),
    }
  }

  fn schema(message: impl Into<String>) -> Self {
    Self {
      kind: ValidationErrorKind::SchemaViolation,
      message: message.into(),
    }
  }
}

/// Names used when checking one of the two exclusive-pair sections.
struct Section {
  flat: &'static str,
  sets: &'static str,
  entry: &'static str,
  set_kind: &'static str,
}

const VARIABLES: Section = Section {
  flat: "variables",
  sets: "variable_sets",
  entry: "Variable",
  set_kind: "variable set",
};

const RULES: Section = Section {
  flat: "rules",
  sets: "rule_sets",
  entry: "Rule",
  set_kind: "rule set",
};

const REQUIRED_FIELDS: [&str; 3] = ["input", "output", "rule"];
const LIST_FIELDS: [&str; 2] = ["opt_input", "opt_output"];

/// Validate the config file at `path` and return the parsed document.
///
/// # Errors
///
/// Returns the first violated constraint:
/// - [`ValidationErrorKind::NotFound`] if the file cannot be read
/// - [`ValidationErrorKind::MalformedDocument`] if it is not JSON
/// - [`ValidationErrorKind::SchemaViolation`] for any structural problem
pub fn validate_config(path: &Path) -> Result<Config, ValidationError> {
  let content = fs::read(path).map_err(|e| {
    debug!(path = %path.display(), error = %e, "failed to read config");
    ValidationError::not_found(path)
  })?;

  let document: Value = serde_json::from_slice(&content).map_err(|e| {
    debug!(path = %path.display(), error = %e, "failed to parse config");
    ValidationError::malformed()
  })?;

  validate_document(&document, &path.display().to_string())?;
  into_config(document)
}

/// Validate config text that has already been loaded. `source` names the
/// document in error messages.
pub fn validate_str(content: &str, source: &str) -> Result<Config, ValidationError> {
  let document: Value = serde_json::from_str(content).map_err(|_| ValidationError::malformed())?;
  validate_document(&document, source)?;
  into_config(document)
}

/// Run the structural checks against a parsed JSON document.
pub fn validate_document(document: &Value, source: &str) -> Result<(), ValidationError> {
  let root = document
    .as_object()
    .ok_or_else(|| ValidationError::schema(format!("'{source}' must contain a JSON object at the top level")))?;

  check_section(root, &VARIABLES, source)?;
  check_section(root, &RULES, source)?;
  check_build_statements(root, source)?;

  debug!(source, "config passed validation");
  Ok(())
}

fn into_config(document: Value) -> Result<Config, ValidationError> {
  serde_json::from_value(document).map_err(|e| ValidationError::schema(format!("Invalid configuration: {e}")))
}

fn check_section(root: &Map<String, Value>, section: &Section, source: &str) -> Result<(), ValidationError> {
  match (root.get(section.flat), root.get(section.sets)) {
    (None, None) => Err(ValidationError::schema(format!(
      "'{source}' must have either a '{}' or '{}' entry",
      section.flat, section.sets
    ))),
    (Some(_), Some(_)) => Err(ValidationError::schema(format!(
      "'{source}' cannot contain both '{}' and '{}' entries",
      section.flat, section.sets
    ))),
    (Some(flat), None) => {
      let entries = flat
        .as_object()
        .ok_or_else(|| ValidationError::schema(format!("{} entry must be an object", section.flat)))?;
      check_entries(entries, section, None)
    }
    (None, Some(sets)) => {
      let sets = sets
        .as_object()
        .ok_or_else(|| ValidationError::schema(format!("{} entry must be an object", section.sets)))?;
      for (name, set) in sets {
        let entries = set
          .as_object()
          .ok_or_else(|| ValidationError::schema(format!("Set with key '{name}' must be an object")))?;
        check_entries(entries, section, Some(name))?;
      }
      Ok(())
    }
  }
}

fn check_entries(entries: &Map<String, Value>, section: &Section, set: Option<&str>) -> Result<(), ValidationError> {
  for (key, value) in entries {
    let subject = match set {
      Some(set) => format!("{} with key '{key}' in {} '{set}'", section.entry, section.set_kind),
      None => format!("{} with key '{key}'", section.entry),
    };
    check_string_or_list(value, &subject)?;
  }
  Ok(())
}

fn check_string_or_list(value: &Value, subject: &str) -> Result<(), ValidationError> {
  match value {
    Value::String(_) => Ok(()),
    Value::Array(items) => match items.iter().position(|item| !item.is_string()) {
      Some(index) => Err(ValidationError::schema(format!(
        "{subject} has a non-string element at index {index}"
      ))),
      None => Ok(()),
    },
    _ => Err(ValidationError::schema(format!(
      "{subject} must be a string or an array of strings"
    ))),
  }
}

fn check_build_statements(root: &Map<String, Value>, source: &str) -> Result<(), ValidationError> {
  let statements = root
    .get("build_statements")
    .ok_or_else(|| ValidationError::schema(format!("'{source}' must have a 'build_statements' entry")))?
    .as_array()
    .ok_or_else(|| ValidationError::schema("build_statements entry must be an array"))?;

  for (index, statement) in statements.iter().enumerate() {
    let fields = statement
      .as_object()
      .ok_or_else(|| ValidationError::schema(format!("Build statement at index {index} must be an object")))?;

    for field in REQUIRED_FIELDS {
      match fields.get(field) {
        None => {
          return Err(ValidationError::schema(format!(
            "Build statement at index {index} is missing required field '{field}'"
          )));
        }
        Some(Value::String(_)) => {}
        Some(_) => {
          return Err(ValidationError::schema(format!(
            "Field '{field}' of build statement at index {index} must be a string"
          )));
        }
      }
    }

    if fields.get("default").is_some_and(|v| !v.is_boolean()) {
      return Err(ValidationError::schema(format!(
        "Field 'default' of build statement at index {index} must be a boolean"
      )));
    }

    if fields.get("phony").is_some_and(|v| !v.is_string()) {
      return Err(ValidationError::schema(format!(
        "Field 'phony' of build statement at index {index} must be a string"
      )));
    }

    for field in LIST_FIELDS {
      if let Some(value) = fields.get(field) {
        check_string_or_list(value, &format!("Field '{field}' of build statement at index {index}"))?;
      }
    }
  }

  Ok(())
}
