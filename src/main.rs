//! Wardrobe - chat with a stylist about the clothes you own
//!
#![doc = "Wardrobe - chat with a stylist about the clothes you own"]
#![doc = "Main entry point for the wardrobe assistant."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wardrobe::cli::{Cli, Commands};
use wardrobe::commands;
use wardrobe::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { provider: _, images } => {
            if !images.is_empty() {
                tracing::debug!("Uploading {} images before the session", images.len());
            }

            // Moves `config` into the handler (match arms are exclusive)
            commands::chat::run_chat(config, images).await?;
            Ok(())
        }
        Commands::Ask {
            prompt,
            images,
            provider: _,
            json,
        } => {
            tracing::info!("Starting one-shot question");
            tracing::debug!("Using prompt: {}", prompt);

            commands::ask::run_ask(config, prompt, images, json).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output.
/// Logs go to stderr so `ask --json` keeps stdout clean.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "wardrobe=debug" } else { "wardrobe=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
