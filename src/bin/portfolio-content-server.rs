// ABOUTME: Server binary for the portfolio content API
// ABOUTME: Loads configuration, initializes resources, and serves HTTP until shutdown
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Portfolio Content Server Binary
//!
//! Starts the HTTP API with the content store, session gate, and admin
//! mutation surface.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use portfolio_content_server::{config::ServerConfig, context::ServerContext, logging, routes};
use tracing::info;

#[derive(Parser)]
#[command(name = "portfolio-content-server")]
#[command(about = "Portfolio content API - profile, skills, packages, and projects")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting portfolio content server");
    info!("{}", config.summary());

    let http_port = config.http_port;
    let context = Arc::new(ServerContext::initialize(config).await?);
    info!("Database initialized and default content ensured");

    let app = routes::router(context);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", http_port)).await?;
    info!(port = http_port, "Listening for HTTP connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve when the process receives a termination signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown signal handler");
    }
}
