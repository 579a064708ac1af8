use clap::Parser;
use is_terminal::IsTerminal;
use lifeally_cli::args::{Cli, Commands, OutputFormat};
use lifeally_cli::commands::{handle_models, handle_predict};
use lifeally_cli::output::{output_error, print_models, print_pipeline_output};
use lifeally_cli::{CliContext, load_config};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();

    let format = cli.output.unwrap_or(match cli.command {
        Commands::Predict(_) => OutputFormat::Json,
        _ => OutputFormat::Text,
    });

    if let Err(e) = run(cli, format).await {
        output_error(&e.to_string(), format);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, format: OutputFormat) -> lifeally::Result<()> {
    if matches!(cli.command, Commands::Version) {
        println!("Lifeally CLI v{}", lifeally::VERSION);
        return Ok(());
    }

    let config = load_config(cli.config.as_deref(), cli.models_dir.as_deref())?;
    let context = CliContext::new(config)?;

    match &cli.command {
        Commands::Version => {}
        Commands::Predict(args) => {
            let pipeline = context.pipeline()?;
            let output = handle_predict(&pipeline, args).await?;
            print_pipeline_output(&output, format);
        }
        Commands::Models(args) => {
            let models = handle_models(&context.registry, args)?;
            print_models(&models, format);
        }
    }

    Ok(())
}
