//! Base template parsing and section substitution.
//!
//! A base template is plain text containing one `{{name}}` marker for each
//! [`Section`]. Parsing splits it into literal text and typed section slots, so
//! rendering is a single pass that never re-scans substituted content. A rule
//! command that happens to contain `{{rules}}` is emitted verbatim.
//!
//! # Markers
//!
//! - `{{variables}}` - variable assignments
//! - `{{rules}}` - rule blocks
//! - `{{build_statements}}` - build statements
//! - `{{defaults}}` - default target declarations
//! - `{{phony_aliases}}` - phony alias build statements
//!
//! Every marker must appear exactly once.
//!
//! # Example
//!
//! ```
//! use nodja_lib::ninja::{Section, Segment, Template};
//!
//! let template = Template::parse(
//!   "{{variables}}\n{{rules}}\n{{build_statements}}\n{{defaults}}\n{{phony_aliases}}\n",
//! )
//! .unwrap();
//! assert_eq!(template.segments()[0], Segment::Section(Section::Variables));
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A region of the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
  Variables,
  Rules,
  BuildStatements,
  Defaults,
  PhonyAliases,
}

impl Section {
  /// All sections, in the order they appear in the built-in template.
  pub const ALL: [Section; 5] = [
    Section::Variables,
    Section::Rules,
    Section::BuildStatements,
    Section::Defaults,
    Section::PhonyAliases,
  ];

  /// The marker name used inside `{{ }}`.
  pub fn name(self) -> &'static str {
    match self {
      Section::Variables => "variables",
      Section::Rules => "rules",
      Section::BuildStatements => "build_statements",
      Section::Defaults => "defaults",
      Section::PhonyAliases => "phony_aliases",
    }
  }

  fn from_name(name: &str) -> Option<Self> {
    Section::ALL.into_iter().find(|s| s.name() == name)
  }
}

impl fmt::Display for Section {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Text copied to the output unchanged
  Literal(String),

  /// Slot filled with the rendered entries of a section
  Section(Section),
}

/// Errors that can occur while parsing a base template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
  #[error("unclosed section marker at position {0}")]
  Unclosed(usize),

  #[error("unknown section marker: {{{{{0}}}}}")]
  UnknownSection(String),

  #[error("section marker {{{{{0}}}}} appears more than once")]
  DuplicateSection(Section),

  #[error("template is missing the {{{{{0}}}}} section marker")]
  MissingSection(Section),
}

/// A parsed base template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
  segments: Vec<Segment>,
}

impl Template {
  /// Parse template text into segments.
  ///
  /// # Errors
  ///
  /// Returns an error if a marker is unclosed, names an unknown section, or if
  /// any section is missing or repeated.
  pub fn parse(input: &str) -> Result<Self, TemplateError> {
    let mut segments = Vec::new();
    let mut seen: Vec<Section> = Vec::with_capacity(Section::ALL.len());
    let mut rest = input;
    let mut offset = 0;

    while let Some(start) = rest.find("{{") {
      if start > 0 {
        segments.push(Segment::Literal(rest[..start].to_string()));
      }

      let body = &rest[start + 2..];
      let end = body.find("}}").ok_or(TemplateError::Unclosed(offset + start))?;
      let name = &body[..end];

      let section = Section::from_name(name).ok_or_else(|| TemplateError::UnknownSection(name.to_string()))?;
      if seen.contains(&section) {
        return Err(TemplateError::DuplicateSection(section));
      }
      seen.push(section);
      segments.push(Segment::Section(section));

      let consumed = start + 2 + end + 2;
      offset += consumed;
      rest = &rest[consumed..];
    }

    if !rest.is_empty() {
      segments.push(Segment::Literal(rest.to_string()));
    }

    if let Some(missing) = Section::ALL.into_iter().find(|s| !seen.contains(s)) {
      return Err(TemplateError::MissingSection(missing));
    }

    Ok(Self { segments })
  }

  pub fn segments(&self) -> &[Segment] {
    &self.segments
  }

  /// Render the template, asking `fill` for the text of each section.
  pub fn render<F>(&self, mut fill: F) -> String
  where
    F: FnMut(Section) -> String,
  {
    let mut out = String::new();
    for segment in &self.segments {
      match segment {
        Segment::Literal(text) => out.push_str(text),
        Segment::Section(section) => out.push_str(&fill(*section)),
      }
    }
    out
  }
}

impl FromStr for Template {
  type Err = TemplateError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Template::parse(s)
  }
}
