//! Wildcard expansion for build statement inputs.
//!
//! Patterns use globset syntax with `*` confined to one path component and
//! `**` crossing directories. Matching walks only the directory named by the
//! pattern's literal prefix, in file-name order, so results are sorted and
//! stable across runs. Without `**` the walk stops at the pattern's depth.
//!
//! Symlinks are followed. Entries whose name starts with `.` are skipped unless
//! a wildcard component of the pattern itself starts with `.`.

use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Errors for wildcard expansion
#[derive(Debug, Error)]
pub enum GlobError {
  #[error("Invalid glob pattern '{pattern}': {source}")]
  Pattern {
    pattern: String,
    #[source]
    source: globset::Error,
  },
}

/// Whether `pattern` contains wildcard syntax.
pub fn has_magic(pattern: &str) -> bool {
  pattern.contains(['*', '?', '[', '{'])
}

/// Expand `pattern` into the files it matches.
///
/// Relative patterns are resolved against `base_dir` and produce paths relative
/// to it; absolute patterns produce absolute paths. A pattern matching nothing
/// yields an empty list. Unreadable entries met during the walk are logged and
/// skipped.
pub fn expand(pattern: &str, base_dir: &Path) -> Result<Vec<String>, GlobError> {
  let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
  let absolute = Path::new(pattern).is_absolute();

  let matcher = GlobBuilder::new(pattern)
    .literal_separator(true)
    .build()
    .map_err(|e| GlobError::Pattern {
      pattern: pattern.to_string(),
      source: e,
    })?
    .compile_matcher();

  let (prefix, rest) = split_pattern(pattern);
  let root = if prefix.as_os_str().is_empty() {
    base_dir.to_path_buf()
  } else {
    base_dir.join(&prefix)
  };
  let include_hidden = rest.iter().any(|component| component.starts_with('.'));

  let mut walker = WalkDir::new(&root).follow_links(true).sort_by_file_name();
  if !rest.iter().any(|component| component.contains("**")) {
    walker = walker.max_depth(rest.len());
  }

  let mut matches = Vec::new();
  if root.is_dir() {
    let entries = walker
      .into_iter()
      .filter_entry(|entry| include_hidden || entry.depth() == 0 || !is_hidden(entry.file_name()));

    for entry in entries {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!(pattern, error = %e, "skipping unreadable path");
          continue;
        }
      };
      if !entry.file_type().is_file() {
        continue;
      }

      let candidate = if absolute {
        entry.path()
      } else {
        entry.path().strip_prefix(base_dir).unwrap_or(entry.path())
      };
      if matcher.is_match(candidate) {
        matches.push(candidate.to_string_lossy().replace('\\', "/"));
      }
    }
  }

  if matches.is_empty() {
    warn!(pattern, base_dir = %base_dir.display(), "glob matched no files");
  } else {
    debug!(pattern, count = matches.len(), "expanded glob");
  }

  Ok(matches)
}

/// Split `pattern` into the leading directories that contain no wildcards and
/// the remaining components. The final component always lands in the
/// remainder.
fn split_pattern(pattern: &str) -> (PathBuf, Vec<&str>) {
  let components: Vec<&str> = pattern.split('/').collect();
  let literal = components[..components.len() - 1]
    .iter()
    .take_while(|component| !has_magic(component))
    .count();

  let mut prefix = PathBuf::new();
  for (i, component) in components[..literal].iter().enumerate() {
    if component.is_empty() {
      if i == 0 {
        prefix.push("/");
      }
      continue;
    }
    prefix.push(component);
  }

  let rest = components[literal..]
    .iter()
    .copied()
    .filter(|component| !component.is_empty())
    .collect();
  (prefix, rest)
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
  name.to_string_lossy().starts_with('.')
}
