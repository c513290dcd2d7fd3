//! Built-in template content for generated ninja files.

use super::builder::BuildStatement;

/// Base template for the generated build file.
/// Contains one marker per section, see [`super::Template`].
pub const NINJA_TEMPLATE: &str = r#"# This file is generated by nodja. Do not edit.

# Variables
{{variables}}

# Rules
{{rules}}

# Build statements
{{build_statements}}

# Defaults
{{defaults}}

# Phony aliases
{{phony_aliases}}
"#;

/// Joins the accumulated values of a variable.
pub const VALUE_SEPARATOR: &str = " ";

/// Chains the accumulated commands of a rule.
pub const COMMAND_SEPARATOR: &str = " && ";

/// Joins file lists (dependencies, outputs, phony targets).
pub const PATH_SEPARATOR: &str = " ";

pub fn variable_entry(name: &str, values: &[String]) -> String {
  format!("{} = {}", name, values.join(VALUE_SEPARATOR))
}

pub fn rule_entry(name: &str, commands: &[String]) -> String {
  format!("rule {}\n  command = {}", name, commands.join(COMMAND_SEPARATOR))
}

/// `build <out> [| <implicit outs>]: <rule> [<deps>] [| <implicit deps>]`
pub fn build_statement_entry(statement: &BuildStatement) -> String {
  let mut entry = format!("build {}", statement.output);
  if let Some(outputs) = non_empty(&statement.implicit_outputs) {
    entry.push_str(" | ");
    entry.push_str(outputs);
  }

  entry.push_str(": ");
  entry.push_str(&statement.rule);

  if !statement.dependencies.is_empty() {
    entry.push(' ');
    entry.push_str(&statement.dependencies);
  }
  if let Some(deps) = non_empty(&statement.implicit_dependencies) {
    entry.push_str(" | ");
    entry.push_str(deps);
  }

  entry
}

pub fn default_entry(output: &str) -> String {
  format!("default {}", output)
}

pub fn phony_entry(alias: &str, outputs: &[String]) -> String {
  format!("build {}: phony {}", alias, outputs.join(PATH_SEPARATOR))
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|s| !s.is_empty())
}
