//! Accumulator for ninja build entities.
//!
//! [`NinjaBuilder`] collects variables, rules, build statements, default
//! targets and phony aliases, then renders them into a ninja file. It does not
//! validate what it is given; callers are expected to feed it a config that
//! already passed [`crate::validate`].
//!
//! Every accessor returns an owned copy, so a caller can never change builder
//! state except through the `add_*` methods and [`NinjaBuilder::clear_all`].

use std::sync::LazyLock;

use indexmap::IndexMap;
use serde::Serialize;

use super::template::{Section, Template};
use super::templates::{
  NINJA_TEMPLATE, PATH_SEPARATOR, build_statement_entry, default_entry, phony_entry, rule_entry, variable_entry,
};
use crate::config::StringOrList;

static BUILTIN_TEMPLATE: LazyLock<Template> =
  LazyLock::new(|| Template::parse(NINJA_TEMPLATE).expect("built-in ninja template is well-formed"));

/// A normalized build statement.
///
/// File lists are joined into space-separated strings when the statement is
/// added, so a statement read back only holds the joined form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildStatement {
  pub output: String,
  pub rule: String,
  /// Explicit dependencies
  pub dependencies: String,
  /// Implicit dependencies (`| deps` in ninja syntax)
  pub implicit_dependencies: Option<String>,
  /// Implicit outputs (`| outs` in ninja syntax)
  pub implicit_outputs: Option<String>,
}

/// Builder for a single ninja file.
///
/// Construct one per generation run. Multiple values added under the same
/// variable, rule or phony alias accumulate in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NinjaBuilder {
  variables: IndexMap<String, Vec<String>>,
  rules: IndexMap<String, Vec<String>>,
  build_statements: Vec<BuildStatement>,
  defaults: Vec<String>,
  phony_rules: IndexMap<String, Vec<String>>,
}

impl NinjaBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append `value` to the variable `name`. Lists are flattened.
  pub fn add_variable(&mut self, name: impl Into<String>, value: impl Into<StringOrList>) {
    accumulate(&mut self.variables, name.into(), value.into());
  }

  /// Append `command` to the rule `name`. Commands under one name are chained
  /// with `&&` when rendered.
  pub fn add_rule(&mut self, name: impl Into<String>, command: impl Into<StringOrList>) {
    accumulate(&mut self.rules, name.into(), command.into());
  }

  /// Append a build statement producing `output` from `input` via `rule`.
  pub fn add_build_statement(
    &mut self,
    output: impl Into<String>,
    rule: impl Into<String>,
    input: impl Into<StringOrList>,
    opt_input: Option<StringOrList>,
    opt_output: Option<StringOrList>,
  ) {
    self.build_statements.push(BuildStatement {
      output: output.into(),
      rule: rule.into(),
      dependencies: input.into().join(PATH_SEPARATOR),
      implicit_dependencies: opt_input.map(|v| v.join(PATH_SEPARATOR)),
      implicit_outputs: opt_output.map(|v| v.join(PATH_SEPARATOR)),
    });
  }

  /// Mark `output` as a default target. Duplicates are kept.
  pub fn add_default(&mut self, output: impl Into<String>) {
    self.defaults.push(output.into());
  }

  /// Group `outputs` under the phony target `alias`.
  pub fn add_phony_rule(&mut self, alias: impl Into<String>, outputs: impl Into<StringOrList>) {
    accumulate(&mut self.phony_rules, alias.into(), outputs.into());
  }

  pub fn variables(&self) -> IndexMap<String, Vec<String>> {
    self.variables.clone()
  }

  pub fn rules(&self) -> IndexMap<String, Vec<String>> {
    self.rules.clone()
  }

  pub fn build_statements(&self) -> Vec<BuildStatement> {
    self.build_statements.clone()
  }

  pub fn defaults(&self) -> Vec<String> {
    self.defaults.clone()
  }

  pub fn phony_rules(&self) -> IndexMap<String, Vec<String>> {
    self.phony_rules.clone()
  }

  /// Reset every collection to empty.
  pub fn clear_all(&mut self) {
    self.variables.clear();
    self.rules.clear();
    self.build_statements.clear();
    self.defaults.clear();
    self.phony_rules.clear();
  }

  /// Render the ninja file using the built-in template.
  pub fn generate_ninja_build(&self) -> String {
    self.render(&BUILTIN_TEMPLATE)
  }

  /// Render the ninja file into a custom base template.
  pub fn render(&self, template: &Template) -> String {
    template.render(|section| self.section(section))
  }

  fn section(&self, section: Section) -> String {
    let entries: Vec<String> = match section {
      Section::Variables => self
        .variables
        .iter()
        .map(|(name, values)| variable_entry(name, values))
        .collect(),
      Section::Rules => self
        .rules
        .iter()
        .map(|(name, commands)| rule_entry(name, commands))
        .collect(),
      Section::BuildStatements => self.build_statements.iter().map(build_statement_entry).collect(),
      Section::Defaults => self.defaults.iter().map(|output| default_entry(output)).collect(),
      Section::PhonyAliases => self
        .phony_rules
        .iter()
        .map(|(alias, outputs)| phony_entry(alias, outputs))
        .collect(),
    };
    entries.join("\n")
  }
}

fn accumulate(map: &mut IndexMap<String, Vec<String>>, key: String, value: StringOrList) {
  map.entry(key).or_default().extend(value.into_vec());
}
