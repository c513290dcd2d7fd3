mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nodja_lib::execute::DEFAULT_PROGRAM;
use nodja_lib::generate::DEFAULT_OUTPUT;

use crate::cmd::{GenerateArgs, cmd_check, cmd_generate};
use crate::output::{OutputFormat, print_error};

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "NODJA_LOG";

/// nodja - Generate ninja build files from JSON configs
#[derive(Parser)]
#[command(name = "nodja")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate a ninja build file from a nodja config
  #[command(visible_alias = "g")]
  Generate {
    /// Path to the nodja config
    input_file: PathBuf,

    /// Where to write the ninja file
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Run ninja on the generated file
    #[arg(long)]
    run: bool,

    /// Variable set to use when the config declares `variable_sets`
    #[arg(long)]
    variable_set: Option<String>,

    /// Rule set to use when the config declares `rule_sets`
    #[arg(long)]
    rule_set: Option<String>,

    /// Base template replacing the built-in layout
    #[arg(long)]
    template: Option<PathBuf>,

    /// Ninja executable used with --run
    #[arg(long, env = "NODJA_NINJA", default_value = DEFAULT_PROGRAM)]
    ninja: String,

    /// Output format for the generation summary
    #[arg(long, value_enum, default_value_t)]
    output_format: OutputFormat,
  },

  /// Validate a nodja config without generating anything
  #[command(visible_alias = "c")]
  Check {
    /// Path to the nodja config
    input_file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output_format: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match cli.command {
    Commands::Generate {
      input_file,
      output,
      run,
      variable_set,
      rule_set,
      template,
      ninja,
      output_format,
    } => cmd_generate(GenerateArgs {
      input_file,
      output,
      run,
      variable_set,
      rule_set,
      template,
      ninja,
      format: output_format,
    }),
    Commands::Check {
      input_file,
      output_format,
    } => cmd_check(&input_file, output_format),
  };

  match result {
    Ok(code) => code,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
