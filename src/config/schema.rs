//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};

use crate::models::conventions::{
    DEFAULT_FLAVOR_LABEL_DOMAIN, DEFAULT_JOB_UID_LABEL, DEFAULT_POD_CONTROLLER_UID_LABEL,
};
use crate::models::resource_kind::DEFAULT_KUEUE_API_VERSION;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Snapshot streaming cadence
    #[serde(default)]
    pub stream: StreamConfig,

    /// Kubernetes connection settings
    #[serde(default)]
    pub kube: KubeConfig,

    /// Label conventions used for joins
    #[serde(default)]
    pub conventions: ConventionsConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Address the WebSocket server listens on
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

/// Snapshot streaming configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StreamConfig {
    /// Seconds between snapshot pushes on one connection
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Seconds a single push may take before the connection is dropped
    #[serde(default = "default_send_timeout_secs")]
    pub send_timeout_secs: u64,
}

/// Kubernetes connection configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KubeConfig {
    /// Kubeconfig context to use; inferred when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// API version of the Kueue CRDs
    #[serde(default = "default_kueue_api_version")]
    pub kueue_api_version: String,
}

/// Label conventions configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConventionsConfig {
    /// Domain in `flavor.<domain>/<flavor>` node labels
    #[serde(default = "default_flavor_label_domain")]
    pub flavor_label_domain: String,

    /// Workload label holding the owning job's UID
    #[serde(default = "default_job_uid_label")]
    pub job_uid_label: String,

    /// Pod label holding the owning job's UID
    #[serde(default = "default_pod_controller_uid_label")]
    pub pod_controller_uid_label: String,
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_send_timeout_secs() -> u64 {
    5
}

fn default_kueue_api_version() -> String {
    DEFAULT_KUEUE_API_VERSION.to_string()
}

fn default_flavor_label_domain() -> String {
    DEFAULT_FLAVOR_LABEL_DOMAIN.to_string()
}

fn default_job_uid_label() -> String {
    DEFAULT_JOB_UID_LABEL.to_string()
}

fn default_pod_controller_uid_label() -> String {
    DEFAULT_POD_CONTROLLER_UID_LABEL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            send_timeout_secs: default_send_timeout_secs(),
        }
    }
}

impl Default for KubeConfig {
    fn default() -> Self {
        Self {
            context: None,
            kueue_api_version: default_kueue_api_version(),
        }
    }
}

impl Default for ConventionsConfig {
    fn default() -> Self {
        Self {
            flavor_label_domain: default_flavor_label_domain(),
            job_uid_label: default_job_uid_label(),
            pod_controller_uid_label: default_pod_controller_uid_label(),
        }
    }
}
