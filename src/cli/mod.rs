//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod config;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use config::{ConfigSubcommand, handle_config_command};
pub use logging::*;

/// Real-time WebSocket backend for visualizing Kueue
#[derive(Parser, Debug)]
#[command(name = "kueue-viz")]
#[command(about = "Streams Kueue queue, flavor and workload snapshots over WebSockets", long_about = None)]
pub struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    pub debug: bool,

    /// Path to the configuration file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Address to listen on, overriding server.bindAddress
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Kubeconfig context to use, overriding kube.context
    #[arg(long, value_name = "NAME")]
    pub context: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}
