//! CLI integration tests.

mod check_tests;
mod common;
mod generate_tests;
