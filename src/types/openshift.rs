// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The subset of OpenShift API types the operator reads or rewrites.

use crate::constants::platform::SINGLE_REPLICA_TOPOLOGY;
use k8s_openapi::api::core::v1::PodTemplateSpec;
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cluster-wide egress proxy settings (`proxies.config.openshift.io/cluster`)
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "config.openshift.io",
    version = "v1",
    kind = "Proxy",
    plural = "proxies",
    status = "ProxyStatus",
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct ProxySpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_proxy: Option<String>,
    #[serde(rename = "trustedCA", skip_serializing_if = "Option::is_none")]
    pub trusted_ca: Option<ConfigMapNameReference>,
}

/// Effective proxy values as computed by the cluster network operator
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProxyStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https_proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_proxy: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ConfigMapNameReference {
    #[serde(default)]
    pub name: String,
}

impl Proxy {
    /// True when the cluster proxy references a trusted CA bundle ConfigMap
    pub fn has_trusted_ca(&self) -> bool {
        self.spec
            .trusted_ca
            .as_ref()
            .is_some_and(|ca| !ca.name.is_empty())
    }
}

/// Cluster infrastructure description (`infrastructures.config.openshift.io/cluster`)
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "config.openshift.io",
    version = "v1",
    kind = "Infrastructure",
    plural = "infrastructures",
    status = "InfrastructureStatus",
    schema = "disabled"
)]
pub struct InfrastructureSpec {
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_plane_topology: Option<String>,
}

impl Infrastructure {
    /// Check if the control plane runs as a single replica (SNO)
    pub fn is_single_node(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.control_plane_topology.as_deref())
            == Some(SINGLE_REPLICA_TOPOLOGY)
    }
}

/// OpenShift `DeploymentConfig`. Only the pod template is modelled; every other
/// spec field is carried through `extra` so a replace does not drop it.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default)]
#[kube(
    group = "apps.openshift.io",
    version = "v1",
    kind = "DeploymentConfig",
    plural = "deploymentconfigs",
    namespaced,
    schema = "disabled"
)]
pub struct DeploymentConfigSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
