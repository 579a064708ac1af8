pub mod args;
pub mod commands;
pub mod context;
pub mod output;

pub use args::{Cli, Commands, OutputFormat};
pub use context::{CliContext, load_config};
pub use output::{CliColors, format_error, format_info, format_success, output_error};
