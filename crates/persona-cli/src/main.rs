//! Persona CLI
//!
//! Personalizes a template file for recipients of a value store.

use anyhow::Result;
use clap::Parser;
use persona_cli::cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let output = persona_cli::run(cli).await?;
    print!("{}", output);

    Ok(())
}

/// Initialize tracing subscriber; logs go to stderr so stdout stays clean
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "persona_cli=info,persona_sdk=info,persona_runtime=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
