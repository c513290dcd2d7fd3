//! Delegated invocation of the ninja executor.
//!
//! The executor inherits the current directory, environment and standard
//! streams, and its exit code is handed back to the caller unchanged.

use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

/// Executor launched when none is configured.
pub const DEFAULT_PROGRAM: &str = "ninja";

/// Exit code reported when the executor is terminated by a signal.
const SIGNALED_EXIT_CODE: i32 = 1;

#[derive(Debug, Error)]
pub enum ExecuteError {
  #[error("{program} binary not found")]
  NotFound { program: String },

  #[error("Failed to run {program}: {source}")]
  Spawn { program: String, source: std::io::Error },
}

/// Run `program -f <build_file>` and wait for it to exit.
///
/// # Returns
///
/// The executor's exit code.
///
/// # Errors
///
/// Returns [`ExecuteError::NotFound`] if `program` cannot be located, or
/// [`ExecuteError::Spawn`] for any other launch failure.
pub fn run_ninja(program: &str, build_file: &Path) -> Result<i32, ExecuteError> {
  info!(program, build_file = %build_file.display(), "running build executor");

  let status = Command::new(program)
    .arg("-f")
    .arg(build_file)
    .stdin(Stdio::inherit())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit())
    .status()
    .map_err(|e| match e.kind() {
      std::io::ErrorKind::NotFound => ExecuteError::NotFound {
        program: program.to_string(),
      },
      _ => ExecuteError::Spawn {
        program: program.to_string(),
        source: e,
      },
    })?;

  let code = status.code().unwrap_or(SIGNALED_EXIT_CODE);
  debug!(program, code, "build executor exited");
  Ok(code)
}
