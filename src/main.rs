//! kueue-viz - real-time WebSocket backend for visualizing Kueue
//!
//! Polls the cluster for ClusterQueues, LocalQueues, ResourceFlavors and
//! Workloads and pushes a fresh snapshot to every subscribed dashboard.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use kueue_viz::cli::{self, Args, Command};
use kueue_viz::config::ConfigLoader;
use kueue_viz::kube::{KubeResourceClient, create_client};
use kueue_viz::{AppState, Conventions, StreamSettings, router};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Handle config subcommand
    if let Some(Command::Config { subcommand }) = args.command {
        return cli::handle_config_command(subcommand, args.config.as_deref());
    }

    cli::init_logging(args.debug);

    let mut config =
        ConfigLoader::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if let Some(context) = args.context {
        config.kube.context = Some(context);
    }
    ConfigLoader::validate(&config)?;

    tracing::debug!(
        "Configuration loaded: bindAddress={}, pollIntervalSecs={}, sendTimeoutSecs={}",
        config.server.bind_address,
        config.stream.poll_interval_secs,
        config.stream.send_timeout_secs
    );

    let client = create_client(config.kube.context.as_deref()).await?;
    let resources = KubeResourceClient::new(client, config.kube.kueue_api_version.clone());

    let state = AppState::new(
        Arc::new(resources),
        Conventions::from(&config.conventions),
        StreamSettings::from(&config.stream),
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .await
        .context("Server error")?;

    Ok(())
}
