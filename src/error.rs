// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::workloads::WorkloadKind;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyConfigError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Platform proxy configuration unavailable: {0}")]
    PlatformProxyUnavailable(String),

    #[error("Failed to list {kind} workloads in {namespace}: {source}")]
    ListFailed {
        kind: WorkloadKind,
        namespace: String,
        #[source]
        source: kube::Error,
    },

    #[error("Reconcile did not finish within {0:?}")]
    ReconcileTimeout(Duration),

    #[error("Missing object key: {0}")]
    MissingObjectKey(&'static str),
}

impl ProxyConfigError {
    /// True for a 409 Conflict returned by the API server
    pub fn is_conflict(&self) -> bool {
        matches!(self, ProxyConfigError::KubeError(kube::Error::Api(err)) if err.code == 409)
    }
}

pub type Result<T> = std::result::Result<T, ProxyConfigError>;
