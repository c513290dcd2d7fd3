//! Terminal reporting for `nodja` commands.
//!
//! Status lines go to stdout (success, summary counts) or stderr (errors), with
//! color only when the stream supports it. `--output-format json` swaps the
//! text report for a single pretty-printed JSON document on stdout.

use std::fmt::Display;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

/// How a command reports its result.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
}

/// Render an elapsed generation time, e.g. `12ms`, `1.50s`, `2m 5s`.
pub fn format_duration(duration: Duration) -> String {
  match duration.as_secs() {
    0 => format!("{}ms", duration.as_millis()),
    secs @ 1..=59 => format!("{secs}.{:02}s", duration.subsec_millis() / 10),
    secs => format!("{}m {}s", secs / 60, secs % 60),
  }
}

pub fn print_success(message: &str) {
  let mark = symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green());
  println!("{mark} {message}");
}

pub fn print_error(message: &str) {
  let mark = symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red());
  let text = message.if_supports_color(Stream::Stderr, |s| s.red());
  eprintln!("{mark} {text}");
}

/// One indented `label: value` line of a command summary.
pub fn print_stat(label: &str, value: impl Display) {
  let label = label.if_supports_color(Stream::Stdout, |s| s.dimmed());
  println!("  {label}: {value}");
}

pub fn print_json<T: Serialize>(report: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(report).context("Failed to encode JSON report")?;
  println!("{json}");
  Ok(())
}
