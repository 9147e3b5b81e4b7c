//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Personalize a message template for one or more recipients
#[derive(Parser, Debug)]
#[command(name = "persona")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Value store snapshot (YAML or JSON); overrides the configured store file
    #[arg(long, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Template file to personalize
    #[arg(long, value_name = "FILE")]
    pub template: PathBuf,

    /// Recipient address; repeat for several recipients
    #[arg(long = "recipient", value_name = "ADDRESS", required = true)]
    pub recipients: Vec<String>,

    /// Specify alternate configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable the variable cache
    #[arg(long)]
    pub no_cache: bool,
}
