//! Implementation of the `nodja check` command.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use nodja_lib::validate::{ValidationErrorKind, validate_config};

use crate::output::{OutputFormat, print_error, print_json, print_success};

#[derive(Serialize)]
struct CheckReport {
  valid: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  kind: Option<ValidationErrorKind>,
  #[serde(skip_serializing_if = "Option::is_none")]
  message: Option<String>,
}

/// Validate `file` and report the first problem found, if any.
pub fn cmd_check(file: &Path, format: OutputFormat) -> Result<ExitCode> {
  debug!(file = %file.display(), "checking config");
  let (report, code) = match validate_config(file) {
    Ok(_) => (
      CheckReport {
        valid: true,
        kind: None,
        message: None,
      },
      ExitCode::SUCCESS,
    ),
    Err(err) => (
      CheckReport {
        valid: false,
        kind: Some(err.kind),
        message: Some(err.message),
      },
      ExitCode::FAILURE,
    ),
  };

  if format.is_json() {
    print_json(&report)?;
  } else if let Some(message) = &report.message {
    print_error(message);
  } else {
    print_success(&format!("{} is a valid nodja config", file.display()));
  }

  Ok(code)
}
