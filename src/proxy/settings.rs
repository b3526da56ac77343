// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resolution of the effective proxy values for a ProxyConfig

use crate::config::ReconcilePolicy;
use crate::error::Result;
use crate::proxy::platform::{get_cluster_proxy, is_single_node_cluster};
use crate::types::{Proxy, ProxyConfig, ProxySource};
use kube::Client;
use tracing::{debug, info, instrument, warn};

/// Flat proxy values pushed into the Secret and workloads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxySettings {
    pub http_proxy: String,
    pub https_proxy: String,
    pub no_proxy: String,
    pub inject_ca_cert: bool,
}

impl ProxySettings {
    /// Settings taken verbatim from the ProxyConfig (`custom` source)
    pub fn from_custom(proxy_config: &ProxyConfig, policy: &ReconcilePolicy) -> Self {
        let proxy = &proxy_config.spec.proxy;
        ProxySettings {
            http_proxy: proxy.http_proxy.clone(),
            https_proxy: proxy.https_proxy.clone(),
            no_proxy: proxy.no_proxy.clone(),
            inject_ca_cert: policy.inject_ca_cert_for_custom && proxy_config.spec.inject_ca_cert,
        }
    }

    /// Settings derived from the cluster proxy's status (`openshift` source)
    pub fn from_cluster_proxy(cluster_proxy: &Proxy, proxy_config: &ProxyConfig) -> Self {
        let status = cluster_proxy.status.clone().unwrap_or_default();
        ProxySettings {
            http_proxy: status.http_proxy.unwrap_or_default(),
            https_proxy: status.https_proxy.unwrap_or_default(),
            no_proxy: status.no_proxy.unwrap_or_default(),
            inject_ca_cert: cluster_proxy.has_trusted_ca() && proxy_config.spec.inject_ca_cert,
        }
    }
}

/// Resolve the proxy settings for a ProxyConfig from its configured source
#[instrument(skip(client, proxy_config, policy), fields(source = %proxy_config.spec.proxy_source))]
pub async fn resolve(
    client: &Client,
    proxy_config: &ProxyConfig,
    policy: &ReconcilePolicy,
) -> Result<ProxySettings> {
    let settings = match proxy_config.spec.proxy_source {
        ProxySource::Custom => ProxySettings::from_custom(proxy_config, policy),
        ProxySource::Openshift => {
            log_single_node(client).await;
            let cluster_proxy = get_cluster_proxy(client).await?;
            ProxySettings::from_cluster_proxy(&cluster_proxy, proxy_config)
        }
    };

    info!(
        http_proxy = %settings.http_proxy,
        https_proxy = %settings.https_proxy,
        no_proxy = %settings.no_proxy,
        inject_ca_cert = settings.inject_ca_cert,
        "Resolved proxy settings"
    );

    Ok(settings)
}

/// Diagnostic only, never affects resolution
async fn log_single_node(client: &Client) {
    match is_single_node_cluster(client).await {
        Ok(single_node) => info!("Single-node OpenShift cluster: {}", single_node),
        Err(e) => {
            warn!("Failed to determine if this is a single-node cluster: {}", e);
            debug!("Continuing proxy resolution without topology information");
        }
    }
}
