// ABOUTME: Server binary: loads configuration, wires resources and serves HTTP
// ABOUTME: Exits with an error when the completion service credential is missing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutriplan Server Binary
//!
//! Starts the recommendation HTTP server. Configuration comes from the
//! environment (and `.env`); the flags below override individual values.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use nutriplan_server::{
    config::environment::ServerConfig, logging, resources::ServerResources, server,
};
use tracing::{error, info};

/// Command-line overrides for environment configuration
#[derive(Parser)]
#[command(name = "nutriplan-server")]
#[command(about = "Nutriplan - personalized meal and workout recommendations")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the fallback recommendation asset path
    #[arg(long)]
    fallback_asset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env().inspect_err(|e| {
        error!(error = %e, "Configuration error, refusing to start");
    })?;

    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(path) = args.fallback_asset {
        config.fallback_asset_path = Some(path);
    }

    info!("{}", config.summary());

    let resources = Arc::new(ServerResources::from_config(&config));
    server::run(&config, resources).await?;

    Ok(())
}
