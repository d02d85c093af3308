//! `config` subcommand handling

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::{ConfigLoader, get_config_value, paths, set_config_value};

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "server.bindAddress", "stream.pollIntervalSecs")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "server.bindAddress", "kube.context")
        key: String,
        /// Configuration value
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands
///
/// `config_path` is the `--config` flag; when absent the default location is used.
pub fn handle_config_command(cmd: ConfigSubcommand, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = get_config_value(&config, &key)?;
                println!("{}", value);
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Set { key, value } => {
            let target = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(paths::root_config_path);

            let mut config = if target.exists() {
                ConfigLoader::load_file(&target)?
            } else {
                ConfigLoader::load_defaults()
            };

            set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;
            ConfigLoader::validate(&config)?;

            ConfigLoader::save(&config, &target).context("Failed to save configuration")?;
            println!("Configuration saved to {}", target.display());
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load(config_path).context("Failed to load configuration")?;

            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(paths::root_config_path);
            println!("{}", path.display());
        }
        ConfigSubcommand::Validate => match ConfigLoader::load(config_path) {
            Ok(_) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_writes_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        handle_config_command(
            ConfigSubcommand::Set {
                key: "stream.sendTimeoutSecs".to_string(),
                value: "9".to_string(),
            },
            Some(&path),
        )
        .unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.stream.send_timeout_secs, 9);
    }

    #[test]
    fn test_set_rejects_invalid_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let result = handle_config_command(
            ConfigSubcommand::Set {
                key: "stream.pollIntervalSecs".to_string(),
                value: "0".to_string(),
            },
            Some(&path),
        );
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
