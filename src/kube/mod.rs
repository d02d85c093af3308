//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and exposes the
//! [`ResourceClient`] facade the snapshot builders read through.
//!
//! Supports HTTP/HTTPS proxy configuration via the standard `HTTPS_PROXY`
//! and `NO_PROXY` environment variables.

mod client;

pub use client::*;

use anyhow::{Context, Result};
use kube::config::KubeConfigOptions;
use kube::{Client, Config};

/// Initialize and return a Kubernetes client
///
/// Without a context this uses the default loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
///
/// With a context, the kubeconfig is loaded and that context selected.
pub async fn create_client(context: Option<&str>) -> Result<Client> {
    let config = match context {
        Some(name) => {
            let options = KubeConfigOptions {
                context: Some(name.to_string()),
                ..Default::default()
            };
            Config::from_kubeconfig(&options)
                .await
                .with_context(|| format!("Failed to load kubeconfig context '{}'", name))?
        }
        None => Config::infer()
            .await
            .context("Failed to infer Kubernetes configuration")?,
    };

    tracing::info!("Using Kubernetes API server at {}", config.cluster_url);

    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
    Ok(client)
}
