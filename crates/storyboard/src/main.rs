//! Storyboard CLI binary.
//!
//! - Generate an illustrated story from a topic
//! - List the models the generation services offer

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, GenerateOptions, list_models, load_config, run_generate};

    // Pick up GROQ_API_KEY and friends from .env
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };

    #[cfg(feature = "observability")]
    let tracer_provider = storyboard::observability::init_observability(
        storyboard::observability::ObservabilityConfig::default().with_log_level(log_level),
    )?;

    #[cfg(not(feature = "observability"))]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            prompt,
            text_model,
            image_model,
            output,
            json,
        } => {
            run_generate(
                config,
                GenerateOptions {
                    prompt,
                    text_model,
                    image_model,
                    output,
                    json,
                },
            )
            .await?;
        }

        Commands::Models => {
            list_models(&config).await?;
        }
    }

    #[cfg(feature = "observability")]
    storyboard::observability::shutdown_observability(tracer_provider);

    Ok(())
}
