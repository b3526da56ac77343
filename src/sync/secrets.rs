// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Create-or-update of the Secret holding the resolved proxy values

use crate::constants::{labels, secret as keys};
use crate::error::{ProxyConfigError, Result};
use crate::proxy::ProxySettings;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::{
    api::{ObjectMeta, PostParams},
    Api, Client, ResourceExt,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// What `ensure_secret` had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSync {
    Created,
    Updated,
    Unchanged,
}

/// Name of the proxy Secret for a workload: the override label, else the default
pub fn proxy_secret_name<K: ResourceExt>(workload: &K) -> String {
    workload
        .labels()
        .get(labels::PROXY_SECRET_NAME)
        .filter(|name| !name.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| keys::DEFAULT_NAME.to_string())
}

/// The three managed keys and their values
fn proxy_entries(settings: &ProxySettings) -> [(&'static str, &str); 3] {
    [
        (keys::HTTP_PROXY_KEY, settings.http_proxy.as_str()),
        (keys::HTTPS_PROXY_KEY, settings.https_proxy.as_str()),
        (keys::NO_PROXY_KEY, settings.no_proxy.as_str()),
    ]
}

/// Check if the Secret already holds exactly the resolved values.
/// A missing key compares equal to an empty value.
pub fn secret_matches(secret: &Secret, settings: &ProxySettings) -> bool {
    proxy_entries(settings).iter().all(|(key, value)| {
        let current = secret
            .data
            .as_ref()
            .and_then(|d| d.get(*key))
            .map(|b| b.0.as_slice())
            .unwrap_or_default();
        current == value.as_bytes()
    })
}

/// Overwrite the three managed keys, leaving any other data untouched
fn apply_proxy_data(mut secret: Secret, settings: &ProxySettings) -> Secret {
    let data = secret.data.get_or_insert_with(BTreeMap::new);
    for (key, value) in proxy_entries(settings) {
        data.insert(key.to_string(), ByteString(value.as_bytes().to_vec()));
    }
    secret
}

fn new_proxy_secret(name: &str, namespace: &str, settings: &ProxySettings) -> Secret {
    let secret = Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        type_: Some("Opaque".to_string()),
        ..Default::default()
    };
    apply_proxy_data(secret, settings)
}

/// Make sure the named Secret exists and holds the resolved proxy values.
///
/// A 409 from the API server is retried up to `conflict_retries` times by
/// re-reading the Secret; with the default of zero it surfaces to the caller.
#[instrument(skip(client, settings))]
pub async fn ensure_secret(
    client: &Client,
    name: &str,
    namespace: &str,
    settings: &ProxySettings,
    conflict_retries: u32,
) -> Result<SecretSync> {
    let secrets: Api<Secret> = Api::namespaced(client.clone(), namespace);
    let mut attempt = 0;

    loop {
        let result = match secrets.get_opt(name).await? {
            None => secrets
                .create(&PostParams::default(), &new_proxy_secret(name, namespace, settings))
                .await
                .map(|_| SecretSync::Created),
            Some(existing) if secret_matches(&existing, settings) => {
                debug!("Secret {}/{} already up to date", namespace, name);
                return Ok(SecretSync::Unchanged);
            }
            Some(existing) => secrets
                .replace(name, &PostParams::default(), &apply_proxy_data(existing, settings))
                .await
                .map(|_| SecretSync::Updated),
        };

        match result.map_err(ProxyConfigError::from) {
            Ok(outcome) => {
                info!("Secret {}/{} {:?}", namespace, name, outcome);
                return Ok(outcome);
            }
            Err(e) if e.is_conflict() && attempt < conflict_retries => {
                attempt += 1;
                warn!(
                    "Conflict writing Secret {}/{}, retrying ({}/{})",
                    namespace, name, attempt, conflict_retries
                );
            }
            Err(e) => return Err(e),
        }
    }
}
