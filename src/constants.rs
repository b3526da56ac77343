// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Workload label keys read by the operator
pub mod labels {
    /// When set to exactly "true", the workload receives proxy environment variables
    pub const INJECT_PROXY_ENV: &str = "proxy.k8s.kemo.dev/inject-proxy-env";
    /// Overrides the name of the Secret the injected variables reference (optional)
    pub const PROXY_SECRET_NAME: &str = "proxy.k8s.kemo.dev/proxy-secret-name";
}

/// The managed proxy Secret
pub mod secret {
    /// Secret name used when a workload does not carry the override label
    pub const DEFAULT_NAME: &str = "proxy-config";

    pub const HTTP_PROXY_KEY: &str = "http_proxy";
    pub const HTTPS_PROXY_KEY: &str = "https_proxy";
    pub const NO_PROXY_KEY: &str = "no_proxy";
}

/// OpenShift platform singletons
pub mod platform {
    /// Name of the cluster-scoped `Proxy` and `Infrastructure` objects
    pub const SINGLETON_NAME: &str = "cluster";
    /// `Infrastructure.status.controlPlaneTopology` of a single-node cluster
    pub const SINGLE_REPLICA_TOPOLOGY: &str = "SingleReplica";
}

/// The operator name used in logs and as the controller identity
pub const OPERATOR_NAME: &str = "proxy-config-operator";
