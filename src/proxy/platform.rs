// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Access to the cluster-scoped OpenShift configuration singletons

use crate::constants::platform::SINGLETON_NAME;
use crate::error::{ProxyConfigError, Result};
use crate::types::{Infrastructure, Proxy};
use kube::{Api, Client};
use tracing::{debug, instrument};

/// Get the cluster-wide OpenShift proxy configuration
#[instrument(skip(client))]
pub async fn get_cluster_proxy(client: &Client) -> Result<Proxy> {
    let proxies: Api<Proxy> = Api::all(client.clone());

    match proxies.get(SINGLETON_NAME).await {
        Ok(proxy) => Ok(proxy),
        Err(kube::Error::Api(err)) if err.code == 404 => {
            Err(ProxyConfigError::PlatformProxyUnavailable(format!(
                "proxies.config.openshift.io/{} not found on the cluster",
                SINGLETON_NAME
            )))
        }
        Err(e) => Err(ProxyConfigError::PlatformProxyUnavailable(format!(
            "failed to read proxies.config.openshift.io/{}: {}",
            SINGLETON_NAME, e
        ))),
    }
}

/// Check whether the cluster is a single-node OpenShift install
#[instrument(skip(client))]
pub async fn is_single_node_cluster(client: &Client) -> Result<bool> {
    let infrastructures: Api<Infrastructure> = Api::all(client.clone());
    let infra = infrastructures.get(SINGLETON_NAME).await?;

    debug!(
        topology = ?infra.status.as_ref().and_then(|s| s.control_plane_topology.as_deref()),
        "Read cluster infrastructure"
    );

    Ok(infra.is_single_node())
}
