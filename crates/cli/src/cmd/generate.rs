//! Implementation of the `nodja generate` command.
//!
//! This command validates a nodja config, writes the resulting ninja file and,
//! with `--run`, hands the file to ninja.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info};

use nodja_lib::execute::run_ninja;
use nodja_lib::generate::{GenerateOptions, generate};

use crate::output::{OutputFormat, format_duration, print_error, print_json, print_stat, print_success};

/// Printed after any generation failure.
const ABORT_MESSAGE: &str = "An error occurred! Aborting.";

/// Arguments for the generate command.
pub struct GenerateArgs {
  pub input_file: PathBuf,
  pub output: PathBuf,
  pub run: bool,
  pub variable_set: Option<String>,
  pub rule_set: Option<String>,
  pub template: Option<PathBuf>,
  pub ninja: String,
  pub format: OutputFormat,
}

/// Execute the generate command.
///
/// Returns the process exit code: the executor's own code with `--run`,
/// success otherwise.
///
/// # Errors
///
/// Generation failures are reported here and turned into a failing exit code.
/// Errors are only returned for output failures.
pub fn cmd_generate(args: GenerateArgs) -> Result<ExitCode> {
  let start = Instant::now();

  let mut options = GenerateOptions::new(args.input_file);
  options.output_path = args.output;
  options.variable_set = args.variable_set;
  options.rule_set = args.rule_set;
  options.template_path = args.template;

  let result = match generate(&options) {
    Ok(result) => result,
    Err(err) => {
      print_error(&err.to_string());
      print_error(ABORT_MESSAGE);
      return Ok(ExitCode::FAILURE);
    }
  };

  if args.format.is_json() {
    print_json(&result)?;
  } else {
    print_success(&format!(
      "Generated {} in {}",
      result.output_path.display(),
      format_duration(start.elapsed())
    ));
    print_stat("Variables", result.variables);
    print_stat("Rules", result.rules);
    print_stat("Build statements", result.build_statements);
    print_stat("Defaults", result.defaults);
    print_stat("Phony aliases", result.phony_aliases);
  }

  if !args.run {
    return Ok(ExitCode::SUCCESS);
  }

  info!(program = %args.ninja, "running executor");
  match run_ninja(&args.ninja, &result.output_path) {
    Ok(code) => {
      debug!(code, "executor finished");
      Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
    }
    Err(err) => {
      print_error(&format!("ERROR: {err}"));
      Ok(ExitCode::FAILURE)
    }
  }
}
