//! Typed view of a nodja configuration document.
//!
//! These types are only constructed after [`crate::validate`] has checked the
//! raw JSON, so deserialization is expected to succeed for any document that
//! passed validation.
//!
//! # Example
//!
//! ```json
//! {
//!   "variables": { "uglify_flags": "--mangle --compress" },
//!   "rules": { "uglifyjs": ["jshint $in", "uglifyjs $in --output $out ${uglify_flags}"] },
//!   "build_statements": [
//!     { "input": "src/*.js", "output": "build/app.min.js", "rule": "uglifyjs", "default": true }
//!   ]
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A value that may be written either as a single string or as an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
  One(String),
  Many(Vec<String>),
}

impl StringOrList {
  /// Flatten into an owned list of strings, preserving order.
  pub fn into_vec(self) -> Vec<String> {
    match self {
      StringOrList::One(s) => vec![s],
      StringOrList::Many(v) => v,
    }
  }

  /// Join all parts with `sep`.
  pub fn join(&self, sep: &str) -> String {
    match self {
      StringOrList::One(s) => s.clone(),
      StringOrList::Many(v) => v.join(sep),
    }
  }
}

impl From<&str> for StringOrList {
  fn from(value: &str) -> Self {
    StringOrList::One(value.to_string())
  }
}

impl From<String> for StringOrList {
  fn from(value: String) -> Self {
    StringOrList::One(value)
  }
}

impl From<Vec<String>> for StringOrList {
  fn from(value: Vec<String>) -> Self {
    StringOrList::Many(value)
  }
}

impl From<&[&str]> for StringOrList {
  fn from(value: &[&str]) -> Self {
    StringOrList::Many(value.iter().map(|s| s.to_string()).collect())
  }
}

impl<const N: usize> From<[&str; N]> for StringOrList {
  fn from(value: [&str; N]) -> Self {
    StringOrList::Many(value.iter().map(|s| s.to_string()).collect())
  }
}

/// Name to value mapping used for both variables and rules.
pub type Entries = IndexMap<String, StringOrList>;

/// Named sets of [`Entries`], one of which is selected per generation run.
pub type EntrySets = IndexMap<String, Entries>;

/// One entry of the `build_statements` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStatementDecl {
  /// Explicit dependency, possibly a glob pattern.
  pub input: String,
  pub output: String,
  /// Name of the rule producing `output`.
  pub rule: String,
  /// Whether `output` is built when no target is requested.
  #[serde(default)]
  pub default: bool,
  /// Phony alias that groups `output`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phony: Option<String>,
  /// Implicit dependencies.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub opt_input: Option<StringOrList>,
  /// Implicit outputs.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub opt_output: Option<StringOrList>,
}

/// A validated nodja configuration document.
///
/// Exactly one of `variables`/`variable_sets` and exactly one of
/// `rules`/`rule_sets` is `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub variables: Option<Entries>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub variable_sets: Option<EntrySets>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rules: Option<Entries>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rule_sets: Option<EntrySets>,
  pub build_statements: Vec<BuildStatementDecl>,
}
