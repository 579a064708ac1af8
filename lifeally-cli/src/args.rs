//! Command-line arguments

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lifeally-cli")]
#[command(about = "Run the Lifeally advice pipeline from a terminal", long_about = None)]
#[command(version = lifeally::VERSION)]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the model artifacts
    #[arg(long, short, global = true)]
    pub models_dir: Option<PathBuf>,

    /// Output format; each command picks its own default
    #[arg(long, short, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display version information
    Version,

    /// Run the pipeline for one question without storing anything
    #[command(alias = "ask")]
    Predict(PredictArgs),

    /// List the loaded models with their domains and input columns
    Models(ModelsArgs),
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// One of career, finance, health, relationship
    #[arg(long, short)]
    pub domain: String,

    /// The question, free text or comma-separated values
    #[arg(long, short)]
    pub text: String,

    /// JSON object of already known feature values
    #[arg(long, short)]
    pub profile: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Only models of this domain
    #[arg(long, short)]
    pub domain: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

impl Cli {
    /// Log level implied by the verbosity flags; quiet wins over verbose
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}
