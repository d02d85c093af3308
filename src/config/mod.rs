//! Configuration system for kueue-viz
//!
//! Layered YAML configuration: built-in defaults, an optional config file,
//! environment overrides and finally command line flags.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, ConventionsConfig, KubeConfig, ServerConfig, StreamConfig};

use std::time::Duration;

use crate::models::Conventions;
use crate::stream::StreamSettings;

impl From<&ConventionsConfig> for Conventions {
    fn from(config: &ConventionsConfig) -> Self {
        Conventions {
            flavor_label_domain: config.flavor_label_domain.clone(),
            job_uid_label: config.job_uid_label.clone(),
            pod_controller_uid_label: config.pod_controller_uid_label.clone(),
        }
    }
}

impl From<&StreamConfig> for StreamSettings {
    fn from(config: &StreamConfig) -> Self {
        StreamSettings {
            poll_interval: Duration::from_secs(config.poll_interval_secs),
            send_timeout: Duration::from_secs(config.send_timeout_secs),
        }
    }
}

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "server.bindAddress" => Ok(config.server.bind_address.clone()),
        "stream.pollIntervalSecs" => Ok(config.stream.poll_interval_secs.to_string()),
        "stream.sendTimeoutSecs" => Ok(config.stream.send_timeout_secs.to_string()),
        "kube.context" => Ok(config.kube.context.clone().unwrap_or_default()),
        "kube.kueueApiVersion" => Ok(config.kube.kueue_api_version.clone()),
        "conventions.flavorLabelDomain" => Ok(config.conventions.flavor_label_domain.clone()),
        "conventions.jobUidLabel" => Ok(config.conventions.job_uid_label.clone()),
        "conventions.podControllerUidLabel" => {
            Ok(config.conventions.pod_controller_uid_label.clone())
        }
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "server.bindAddress" => {
            config.server.bind_address = value.to_string();
        }
        "stream.pollIntervalSecs" => {
            config.stream.poll_interval_secs = value
                .parse()
                .context("stream.pollIntervalSecs must be a number")?;
        }
        "stream.sendTimeoutSecs" => {
            config.stream.send_timeout_secs = value
                .parse()
                .context("stream.sendTimeoutSecs must be a number")?;
        }
        "kube.context" => {
            config.kube.context = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
        "kube.kueueApiVersion" => {
            config.kube.kueue_api_version = value.to_string();
        }
        "conventions.flavorLabelDomain" => {
            config.conventions.flavor_label_domain = value.to_string();
        }
        "conventions.jobUidLabel" => {
            config.conventions.job_uid_label = value.to_string();
        }
        "conventions.podControllerUidLabel" => {
            config.conventions.pod_controller_uid_label = value.to_string();
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_round_trip() {
        let mut config = Config::default();
        set_config_value(&mut config, "stream.pollIntervalSecs", "30").unwrap();
        set_config_value(&mut config, "kube.context", "prod").unwrap();
        assert_eq!(
            get_config_value(&config, "stream.pollIntervalSecs").unwrap(),
            "30"
        );
        assert_eq!(get_config_value(&config, "kube.context").unwrap(), "prod");

        set_config_value(&mut config, "kube.context", "").unwrap();
        assert!(config.kube.context.is_none());
    }

    #[test]
    fn test_unknown_and_invalid_keys() {
        let mut config = Config::default();
        assert!(get_config_value(&config, "server.port").is_err());
        assert!(set_config_value(&mut config, "stream.sendTimeoutSecs", "soon").is_err());
    }

    #[test]
    fn test_conversions() {
        let config = Config::default();
        let settings = StreamSettings::from(&config.stream);
        assert_eq!(settings.poll_interval, Duration::from_secs(5));
        assert_eq!(settings.send_timeout, Duration::from_secs(5));

        let conventions = Conventions::from(&config.conventions);
        assert_eq!(conventions, Conventions::default());
    }
}
