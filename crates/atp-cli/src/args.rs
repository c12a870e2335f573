use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the atp binary.
#[derive(Parser, Debug)]
#[command(
    name = "atp",
    version,
    about = "Run async-typing plugin rules against a JSON call fixture"
)]
pub struct CliArgs {
    /// Call fixture to check.
    #[arg(required_unless_present = "list_rules")]
    pub fixture: Option<PathBuf>,

    /// Plugin configuration (JSON). Defaults reproduce the stock stubs.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Report format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print the registered rule names and exit.
    #[arg(long = "list-rules")]
    pub list_rules: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
