// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Upsert of the proxy environment variables into container specs

use crate::constants::secret as keys;
use crate::proxy::ProxySettings;
use k8s_openapi::api::core::v1::{Container, EnvVar, EnvVarSource, PodSpec, SecretKeySelector};

/// Env var names paired with the Secret key they reference
const HTTP_PROXY_VARS: [&str; 2] = ["HTTP_PROXY", "http_proxy"];
const HTTPS_PROXY_VARS: [&str; 2] = ["HTTPS_PROXY", "https_proxy"];
const NO_PROXY_VARS: [&str; 2] = ["NO_PROXY", "no_proxy"];

fn secret_ref(secret_name: &str, secret_key: &str) -> EnvVar {
    EnvVar {
        value: None,
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                name: secret_name.to_string(),
                key: secret_key.to_string(),
                optional: None,
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Replace the entry named `name` in place, or append it when absent
pub fn upsert_env(env: &mut Vec<EnvVar>, name: &str, secret_name: &str, secret_key: &str) {
    let entry = EnvVar {
        name: name.to_string(),
        ..secret_ref(secret_name, secret_key)
    };

    match env.iter_mut().find(|e| e.name == name) {
        Some(existing) => *existing = entry,
        None => env.push(entry),
    }
}

/// Inject the proxy variables into one container, returning whether its env changed.
///
/// An empty setting leaves its two entries as they are unless `remove_empty`
/// is set, in which case they are dropped.
pub fn inject_proxy_env(
    container: &mut Container,
    secret_name: &str,
    settings: &ProxySettings,
    remove_empty: bool,
) -> bool {
    let before = container.env.clone();
    let env = container.env.get_or_insert_with(Vec::new);

    let groups = [
        (HTTP_PROXY_VARS, keys::HTTP_PROXY_KEY, &settings.http_proxy),
        (HTTPS_PROXY_VARS, keys::HTTPS_PROXY_KEY, &settings.https_proxy),
        (NO_PROXY_VARS, keys::NO_PROXY_KEY, &settings.no_proxy),
    ];

    for (names, secret_key, value) in groups {
        for name in names {
            if !value.is_empty() {
                upsert_env(env, name, secret_name, secret_key);
            } else if remove_empty {
                env.retain(|e| e.name != name);
            }
        }
    }

    if before.is_none() && env.is_empty() {
        container.env = None;
    }

    container.env != before
}

/// Inject into every container of a pod spec, returning whether anything changed
pub fn inject_into_pod_spec(
    pod_spec: &mut PodSpec,
    secret_name: &str,
    settings: &ProxySettings,
    remove_empty: bool,
) -> bool {
    pod_spec
        .containers
        .iter_mut()
        .map(|c| inject_proxy_env(c, secret_name, settings, remove_empty))
        .fold(false, |changed, c| changed | c)
}
