// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use k8s_openapi::NamespaceResourceScope;
use kube::api::ObjectMeta;
use kube::Resource;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Desired proxy injection for the workloads in the ProxyConfig's namespace.
///
/// `spec` may be omitted entirely, in which case every field takes its default.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ProxyConfig {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ProxyConfigSpec,
}

impl ProxyConfig {
    pub fn new(name: &str, spec: ProxyConfigSpec) -> Self {
        ProxyConfig {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec,
        }
    }
}

impl Resource for ProxyConfig {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        "ProxyConfig".into()
    }

    fn group(_: &()) -> Cow<'_, str> {
        "proxy.k8s.kemo.dev".into()
    }

    fn version(_: &()) -> Cow<'_, str> {
        "v1alpha1".into()
    }

    fn plural(_: &()) -> Cow<'_, str> {
        "proxyconfigs".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl Serialize for ProxyConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ProxyConfig", 4)?;
        state.serialize_field("apiVersion", &Self::api_version(&()))?;
        state.serialize_field("kind", &Self::kind(&()))?;
        state.serialize_field("metadata", &self.metadata)?;
        state.serialize_field("spec", &self.spec)?;
        state.end()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfigSpec {
    /// Where the proxy values come from
    #[serde(default)]
    pub proxy_source: ProxySource,
    /// Inject the platform CA bundle into workloads
    #[serde(default, rename = "injectCACert")]
    pub inject_ca_cert: bool,
    /// Proxy values used when `proxySource` is `custom`
    #[serde(default)]
    pub proxy: ProxyDefinition,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProxySource {
    /// Read the cluster-wide OpenShift `Proxy` object
    #[default]
    Openshift,
    /// Use the values from the ProxyConfig itself
    Custom,
}

impl fmt::Display for ProxySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxySource::Openshift => write!(f, "openshift"),
            ProxySource::Custom => write!(f, "custom"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyDefinition {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub http_proxy: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub https_proxy: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub no_proxy: String,
    /// ConfigMap holding a CA certificate; carried but not acted upon yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_config: Option<CaConfig>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub key: String,
}
