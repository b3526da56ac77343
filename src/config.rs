// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Restrict the controller to ProxyConfigs in this namespace; all namespaces when unset
    pub watch_namespace: Option<String>,
    pub policy: ReconcilePolicy,
    /// Upper bound on a single reconcile, enforced by the controller
    pub reconcile_timeout: Duration,
    /// Requeue delay handed to the controller after a failed reconcile
    pub error_requeue: Duration,
}

/// Behaviour switches for the points where the operator's semantics are a policy choice.
/// The defaults reproduce the established behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePolicy {
    /// Honour `spec.injectCACert` for the `custom` proxy source too
    pub inject_ca_cert_for_custom: bool,
    /// Remove the env entries of a proxy setting that resolved to an empty value
    pub remove_empty_proxy_env: bool,
    /// How many times a conflicting Secret update is re-read and retried
    pub secret_conflict_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            watch_namespace: None,
            policy: ReconcilePolicy::default(),
            reconcile_timeout: Duration::from_secs(60),
            error_requeue: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let watch_namespace = lookup("WATCH_NAMESPACE").filter(|ns| !ns.trim().is_empty());

        let policy = ReconcilePolicy {
            inject_ca_cert_for_custom: parse_or(
                &lookup,
                "INJECT_CA_CERT_FOR_CUSTOM_SOURCE",
                false,
            )?,
            remove_empty_proxy_env: parse_or(&lookup, "REMOVE_EMPTY_PROXY_ENV", false)?,
            secret_conflict_retries: parse_or(&lookup, "SECRET_CONFLICT_RETRIES", 0)?,
        };

        let reconcile_timeout = parse_or(
            &lookup,
            "RECONCILE_TIMEOUT_SECS",
            defaults.reconcile_timeout.as_secs(),
        )?;
        let error_requeue = parse_or(
            &lookup,
            "ERROR_REQUEUE_SECS",
            defaults.error_requeue.as_secs(),
        )?;

        Ok(Config {
            watch_namespace,
            policy,
            reconcile_timeout: Duration::from_secs(reconcile_timeout),
            error_requeue: Duration::from_secs(error_requeue),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.watch_namespace, None);
        assert_eq!(config.policy, ReconcilePolicy::default());
        assert_eq!(config.reconcile_timeout, Duration::from_secs(60));
        assert_eq!(config.error_requeue, Duration::from_secs(30));
    }

    #[test]
    fn test_all_values_set() {
        let config = Config::from_lookup(lookup_from(&[
            ("WATCH_NAMESPACE", "team-a"),
            ("INJECT_CA_CERT_FOR_CUSTOM_SOURCE", "true"),
            ("REMOVE_EMPTY_PROXY_ENV", "true"),
            ("SECRET_CONFLICT_RETRIES", "3"),
            ("RECONCILE_TIMEOUT_SECS", "10"),
            ("ERROR_REQUEUE_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.watch_namespace.as_deref(), Some("team-a"));
        assert!(config.policy.inject_ca_cert_for_custom);
        assert!(config.policy.remove_empty_proxy_env);
        assert_eq!(config.policy.secret_conflict_retries, 3);
        assert_eq!(config.reconcile_timeout, Duration::from_secs(10));
        assert_eq!(config.error_requeue, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_namespace_means_all_namespaces() {
        let config = Config::from_lookup(lookup_from(&[("WATCH_NAMESPACE", "  ")])).unwrap();
        assert_eq!(config.watch_namespace, None);
    }

    #[test]
    fn test_invalid_bool_is_rejected() {
        let err =
            Config::from_lookup(lookup_from(&[("REMOVE_EMPTY_PROXY_ENV", "yes")])).unwrap_err();
        assert!(err.to_string().contains("REMOVE_EMPTY_PROXY_ENV"));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("SECRET_CONFLICT_RETRIES", "-1")])).is_err());
    }
}
