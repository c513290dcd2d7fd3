//! Ninja file generation from a nodja config.
//!
//! This module drives the whole pipeline behind `nodja generate`:
//! 1. Validate the config file and load it as a typed [`Config`]
//! 2. Choose the active variable and rule sets
//! 3. Expand wildcard inputs and feed every entity to a [`NinjaBuilder`]
//! 4. Render the builder into the built-in or a custom template
//! 5. Write the result to the output path

pub mod glob;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{Config, SetSelectionError, StringOrList};
use crate::ninja::{NinjaBuilder, Template, TemplateError};
use crate::validate::{ValidationError, validate_config};

pub use glob::GlobError;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "build.ninja";

/// Errors that can occur during generation.
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  SetSelection(#[from] SetSelectionError),

  #[error(transparent)]
  Glob(#[from] GlobError),

  #[error("Build statement at index {index} uses a wildcard in its output '{output}'")]
  WildcardOutput { index: usize, output: String },

  #[error("Could not read template '{}': {source}", path.display())]
  ReadTemplate { path: PathBuf, source: std::io::Error },

  #[error("Invalid template '{}': {source}", path.display())]
  Template { path: PathBuf, source: TemplateError },

  #[error("Could not write to '{}'", path.display())]
  WriteOutput {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
  /// Path to the nodja config
  pub config_path: PathBuf,
  /// Where the ninja file is written
  pub output_path: PathBuf,
  /// Entry of `variable_sets` to use
  pub variable_set: Option<String>,
  /// Entry of `rule_sets` to use
  pub rule_set: Option<String>,
  /// Base template replacing the built-in one
  pub template_path: Option<PathBuf>,
  /// Directory wildcard inputs are resolved against
  pub base_dir: PathBuf,
}

impl GenerateOptions {
  pub fn new(config_path: impl Into<PathBuf>) -> Self {
    Self {
      config_path: config_path.into(),
      output_path: PathBuf::from(DEFAULT_OUTPUT),
      variable_set: None,
      rule_set: None,
      template_path: None,
      base_dir: PathBuf::from("."),
    }
  }
}

/// Summary of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateResult {
  pub output_path: PathBuf,
  pub variables: usize,
  pub rules: usize,
  pub build_statements: usize,
  pub defaults: usize,
  pub phony_aliases: usize,
}

/// Validate the config, render it and write the ninja file.
///
/// # Errors
///
/// Returns an error if validation, set selection, wildcard expansion or
/// template loading fails, or if the output cannot be written.
pub fn generate(options: &GenerateOptions) -> Result<GenerateResult, GenerateError> {
  info!(config = %options.config_path.display(), "generating ninja file");

  let config = validate_config(&options.config_path)?;
  let template = options.template_path.as_deref().map(load_template).transpose()?;
  let builder = populate(&config, options)?;

  let content = match &template {
    Some(template) => builder.render(template),
    None => builder.generate_ninja_build(),
  };

  fs::write(&options.output_path, content).map_err(|e| GenerateError::WriteOutput {
    path: options.output_path.clone(),
    source: e,
  })?;

  let result = GenerateResult {
    output_path: options.output_path.clone(),
    variables: builder.variables().len(),
    rules: builder.rules().len(),
    build_statements: builder.build_statements().len(),
    defaults: builder.defaults().len(),
    phony_aliases: builder.phony_rules().len(),
  };
  info!(
    output = %result.output_path.display(),
    build_statements = result.build_statements,
    "wrote ninja file"
  );

  Ok(result)
}

/// Feed a validated config into a fresh [`NinjaBuilder`].
pub fn populate(config: &Config, options: &GenerateOptions) -> Result<NinjaBuilder, GenerateError> {
  let mut builder = NinjaBuilder::new();

  for (name, value) in config.select_variables(options.variable_set.as_deref())? {
    builder.add_variable(name, value);
  }

  for (name, command) in config.select_rules(options.rule_set.as_deref())? {
    builder.add_rule(name, command);
  }

  for (index, statement) in config.build_statements.iter().enumerate() {
    if glob::has_magic(&statement.output) {
      return Err(GenerateError::WildcardOutput {
        index,
        output: statement.output.clone(),
      });
    }

    let input = if glob::has_magic(&statement.input) {
      StringOrList::Many(glob::expand(&statement.input, &options.base_dir)?)
    } else {
      StringOrList::One(statement.input.clone())
    };

    debug!(index, output = %statement.output, rule = %statement.rule, "adding build statement");
    builder.add_build_statement(
      statement.output.as_str(),
      statement.rule.as_str(),
      input,
      statement.opt_input.clone(),
      statement.opt_output.clone(),
    );

    if statement.default {
      builder.add_default(statement.output.as_str());
    }

    if let Some(alias) = &statement.phony {
      builder.add_phony_rule(alias.as_str(), statement.output.as_str());
    }
  }

  Ok(builder)
}

fn load_template(path: &Path) -> Result<Template, GenerateError> {
  let text = fs::read_to_string(path).map_err(|e| GenerateError::ReadTemplate {
    path: path.to_path_buf(),
    source: e,
  })?;

  Template::parse(&text).map_err(|e| GenerateError::Template {
    path: path.to_path_buf(),
    source: e,
  })
}
