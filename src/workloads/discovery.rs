// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Listing of opted-in workloads

use crate::constants::labels;
use crate::error::{ProxyConfigError, Result};
use crate::workloads::Workload;
use kube::{api::ListParams, Api, Client, ResourceExt};
use tracing::{debug, instrument};

/// Label selector matching workloads that opted in to proxy injection
pub fn opt_in_selector() -> String {
    format!("{}=true", labels::INJECT_PROXY_ENV)
}

/// Check if a workload has the opt-in label set to exactly "true"
pub fn is_opted_in<K: ResourceExt>(workload: &K) -> bool {
    workload
        .labels()
        .get(labels::INJECT_PROXY_ENV)
        .is_some_and(|v| v == "true")
}

/// List the opted-in workloads of one kind in a namespace.
///
/// The API server does the selection; the label is checked again locally so
/// a selector-less backend cannot widen the set.
#[instrument(skip(client), fields(kind = %K::KIND))]
pub async fn list_candidates<K: Workload>(client: &Client, namespace: &str) -> Result<Vec<K>> {
    let api: Api<K> = Api::namespaced(client.clone(), namespace);
    let lp = ListParams::default().labels(&opt_in_selector());

    let list = api
        .list(&lp)
        .await
        .map_err(|source| ProxyConfigError::ListFailed {
            kind: K::KIND,
            namespace: namespace.to_string(),
            source,
        })?;

    let candidates: Vec<K> = list
        .items
        .into_iter()
        .filter(|w| is_opted_in(w))
        .collect();

    debug!("Found {} opted-in {}s in {}", candidates.len(), K::KIND, namespace);
    Ok(candidates)
}
