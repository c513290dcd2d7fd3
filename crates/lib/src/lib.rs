//! nodja-lib: JSON build configs to ninja build files
//!
//! This crate provides the pipeline behind the `nodja` CLI:
//! - `validate`: fail-fast schema checks for config documents
//! - `config`: the typed config model and variable/rule set selection
//! - `ninja`: the build model accumulator and template rendering
//! - `generate`: the driver tying validation, glob expansion and rendering together
//! - `execute`: delegated invocation of the ninja executor

pub mod config;
pub mod execute;
pub mod generate;
pub mod ninja;
pub mod validate;
