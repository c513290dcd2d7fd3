//! Configuration document model and set selection.
//!
//! A config declares its variables and rules either directly or as named sets.
//! Set-based configs need one set chosen per generation run; [`Config::select_variables`]
//! and [`Config::select_rules`] perform that choice.

mod types;

pub use types::*;

use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while choosing a variable or rule set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetSelectionError {
  #[error("Config defines several {kind} sets ({available}); choose one with --{flag}")]
  Ambiguous {
    kind: &'static str,
    flag: &'static str,
    available: String,
  },

  #[error("No {kind} set named '{name}' (available: {available})")]
  NotFound {
    kind: &'static str,
    name: String,
    available: String,
  },

  #[error("Config defines no {kind} sets")]
  Empty { kind: &'static str },
}

impl Config {
  /// Resolve the active variables, choosing from `variable_sets` if needed.
  pub fn select_variables(&self, selection: Option<&str>) -> Result<Entries, SetSelectionError> {
    select(
      "variable",
      "variable-set",
      self.variables.as_ref(),
      self.variable_sets.as_ref(),
      selection,
    )
  }

  /// Resolve the active rules, choosing from `rule_sets` if needed.
  pub fn select_rules(&self, selection: Option<&str>) -> Result<Entries, SetSelectionError> {
    select("rule", "rule-set", self.rules.as_ref(), self.rule_sets.as_ref(), selection)
  }
}

fn select(
  kind: &'static str,
  flag: &'static str,
  flat: Option<&Entries>,
  sets: Option<&EntrySets>,
  selection: Option<&str>,
) -> Result<Entries, SetSelectionError> {
  if let Some(entries) = flat {
    if let Some(name) = selection {
      warn!(kind, set = name, "config declares no sets of this kind, ignoring selection");
    }
    return Ok(entries.clone());
  }

  let sets = match sets {
    Some(sets) if !sets.is_empty() => sets,
    _ => return Err(SetSelectionError::Empty { kind }),
  };
  let available = sets.keys().map(String::as_str).collect::<Vec<_>>().join(", ");

  match selection {
    Some(name) => sets.get(name).cloned().ok_or_else(|| SetSelectionError::NotFound {
      kind,
      name: name.to_string(),
      available,
    }),
    None if sets.len() == 1 => {
      let (name, entries) = sets.first().ok_or(SetSelectionError::Empty { kind })?;
      debug!(kind, set = %name, "using the only declared set");
      Ok(entries.clone())
    }
    None => Err(SetSelectionError::Ambiguous { kind, flag, available }),
  }
}
