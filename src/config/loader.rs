//! Configuration loading and merging logic
//!
//! Handles loading configuration from multiple sources and merging them
//! according to precedence rules.

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// Precedence order (highest to lowest):
    /// 1. Environment variable overrides
    /// 2. Config file (`path`, or the default location if it exists)
    /// 3. Built-in defaults
    ///
    /// An explicitly given `path` must exist; the default location may not.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = Self::load_defaults();

        match path {
            Some(path) => {
                config = Self::load_file(path)?;
            }
            None => {
                let root = paths::root_config_path();
                if root.exists() {
                    config = Self::load_file(&root)?;
                }
            }
        }

        config = Self::apply_env_overrides(config)?;
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a file
    ///
    /// Missing sections and keys fall back to their defaults.
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(config: &Config) -> Result<()> {
        config
            .server
            .bind_address
            .parse::<SocketAddr>()
            .with_context(|| {
                format!(
                    "server.bindAddress '{}' is not a valid socket address",
                    config.server.bind_address
                )
            })?;

        if config.stream.poll_interval_secs == 0 {
            anyhow::bail!("stream.pollIntervalSecs must be greater than zero");
        }
        if config.stream.send_timeout_secs == 0 {
            anyhow::bail!("stream.sendTimeoutSecs must be greater than zero");
        }
        if config.kube.kueue_api_version.trim().is_empty() {
            anyhow::bail!("kube.kueueApiVersion must not be empty");
        }

        let conventions = &config.conventions;
        for (key, value) in [
            ("conventions.flavorLabelDomain", &conventions.flavor_label_domain),
            ("conventions.jobUidLabel", &conventions.job_uid_label),
            (
                "conventions.podControllerUidLabel",
                &conventions.pod_controller_uid_label,
            ),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{} must not be empty", key);
            }
        }

        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Result<Config> {
        if let Ok(addr) = std::env::var("KUEUE_VIZ_BIND_ADDRESS") {
            config.server.bind_address = addr;
        }

        if let Ok(secs) = std::env::var("KUEUE_VIZ_POLL_INTERVAL_SECS") {
            config.stream.poll_interval_secs = secs
                .parse()
                .context("KUEUE_VIZ_POLL_INTERVAL_SECS must be a number")?;
        }

        if let Ok(secs) = std::env::var("KUEUE_VIZ_SEND_TIMEOUT_SECS") {
            config.stream.send_timeout_secs = secs
                .parse()
                .context("KUEUE_VIZ_SEND_TIMEOUT_SECS must be a number")?;
        }

        if let Ok(context) = std::env::var("KUEUE_VIZ_CONTEXT") {
            config.kube.context = if context.is_empty() {
                None
            } else {
                Some(context)
            };
        }

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
