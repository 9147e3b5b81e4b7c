//! CLI configuration
//!
//! Settings come from `config/persona.{yaml,toml,json}` (or the file given
//! with `--config`), then `PERSONA_*` environment variables, then flags.

use persona_sdk::{CacheSettings, EngineConfig};
use std::path::Path;

use crate::cli::Cli;

/// Load the engine configuration
pub fn load(config_file: Option<&Path>) -> anyhow::Result<EngineConfig> {
    // Load .env file if exists
    dotenvy::dotenv().ok();

    let file_source = match config_file {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config/persona").required(false),
    };

    let settings = config::Config::builder()
        .add_source(file_source)
        .add_source(config::Environment::with_prefix("PERSONA").separator("__"))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    settings
        .try_deserialize()
        .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
}

/// Apply command-line overrides on top of the loaded configuration
pub fn apply_overrides(mut config: EngineConfig, cli: &Cli) -> EngineConfig {
    if let Some(store) = &cli.store {
        config.store_file = Some(store.clone());
    }
    if cli.no_cache {
        config.cache = CacheSettings::disabled();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("persona.yaml");
        std::fs::write(
            &path,
            "store_file: data/store.yaml\nenable_tracing: true\ncache:\n  ttl_secs: 30\n",
        )
        .unwrap();

        let config = load(Some(path.as_path())).unwrap();
        assert_eq!(config.store_file, Some(PathBuf::from("data/store.yaml")));
        assert!(config.enable_tracing);
        assert_eq!(config.cache.ttl_secs, 30);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        assert!(load(Some(Path::new("/nonexistent/persona.yaml"))).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "persona",
            "--store",
            "other.json",
            "--template",
            "t.txt",
            "--recipient",
            "a@example.com",
            "--no-cache",
        ]);
        let config = apply_overrides(EngineConfig::new().with_store_file("store.yaml"), &cli);

        assert_eq!(config.store_file, Some(PathBuf::from("other.json")));
        assert!(!config.cache.enabled);
    }
}
