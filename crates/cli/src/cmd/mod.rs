mod check;
mod generate;

pub use check::cmd_check;
pub use generate::{GenerateArgs, cmd_generate};
