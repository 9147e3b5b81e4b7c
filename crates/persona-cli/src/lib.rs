//! Persona command-line front end
//!
//! Loads a value store, personalizes a template file for each requested
//! recipient and returns the output text.

pub mod cli;
pub mod config;

use anyhow::Context;
use persona_sdk::PersonalizerBuilder;

use crate::cli::Cli;

/// Run one invocation and return what should be printed.
///
/// A single recipient prints the personalized text as is. Several
/// recipients print one section per address; any recipient that cannot be
/// resolved makes the whole run fail after the others are rendered.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let engine_config =
        crate::config::apply_overrides(crate::config::load(cli.config.as_deref())?, &cli);
    tracing::debug!("Engine configuration: {:?}", engine_config);

    let template = tokio::fs::read_to_string(&cli.template)
        .await
        .with_context(|| format!("Failed to read template {}", cli.template.display()))?;

    let personalizer = PersonalizerBuilder::new()
        .with_config(engine_config)
        .build()
        .await
        .context("Failed to initialize personalizer")?;

    if let [address] = cli.recipients.as_slice() {
        return personalizer
            .personalize(&template, address)
            .with_context(|| format!("Failed to personalize for {}", address));
    }

    let results = personalizer
        .personalize_batch(&template, cli.recipients.as_slice())
        .await;

    let mut output = String::new();
    let mut failed = Vec::new();
    for (address, result) in cli.recipients.iter().zip(results) {
        match result {
            Ok(text) => {
                output.push_str(&format!("==> {} <==\n{}\n", address, text));
            }
            Err(e) => {
                tracing::error!("{}: {}", address, e);
                failed.push(address.as_str());
            }
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("Could not personalize for: {}", failed.join(", "));
    }
    Ok(output)
}
