// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::{info, warn};

use proxy_config_operator::config::Config;
use proxy_config_operator::constants::OPERATOR_NAME;
use proxy_config_operator::reconcilers::ProxyConfigReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting {}", OPERATOR_NAME);

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: watch_namespace={}, policy={:?}",
        config.watch_namespace.as_deref().unwrap_or("<all>"),
        config.policy
    );

    // Create Kubernetes client
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let reconciler = ProxyConfigReconciler::new(client, config);

    info!("Starting ProxyConfig reconciler...");
    reconciler.run().await?;

    warn!("ProxyConfig reconciler stopped");
    Ok(())
}
