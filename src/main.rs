//! LexQA - Regulation knowledge question answering CLI
//!
//! Main entry point for the LexQA application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lexqa::cli::{Cli, Commands};
use lexqa::commands;
use lexqa::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path)?;

    // Execute command
    match cli.command {
        Commands::Chat {
            model,
            temperature,
            output_dir,
            no_export,
        } => {
            let config = config.with_overrides(model, temperature, output_dir, no_export);
            config.validate()?;

            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Ask {
            question,
            model,
            temperature,
            output_dir,
            no_export,
        } => {
            let config = config.with_overrides(model, temperature, output_dir, no_export);
            config.validate()?;

            tracing::debug!(model = %config.model.default, "Answering a single question");
            commands::ask::run_ask(config, question).await?;
            Ok(())
        }
        Commands::Models { json } => {
            config.validate()?;
            commands::models::list_models(&config, json)?;
            Ok(())
        }
        Commands::Auth => {
            tracing::info!("Storing API key");
            commands::auth::authenticate()?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so that answers and JSON listings on stdout stay clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "lexqa=debug" } else { "lexqa=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
