//! Ninja build file model and rendering.
//!
//! [`NinjaBuilder`] accumulates build entities; [`Template`] describes where
//! each section lands in the output file.

mod builder;
mod template;
pub mod templates;

pub use builder::{BuildStatement, NinjaBuilder};
pub use template::{Section, Segment, Template, TemplateError};
