// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ProxyConfig reconciler - resolves proxy settings and pushes them into opted-in workloads.

use crate::config::Config;
use crate::error::{ProxyConfigError, Result};
use crate::proxy::{resolve, ProxySettings};
use crate::reconcilers::outcome::{ItemOutcome, KindSummary, ReconcileOutcome};
use crate::sync::{ensure_secret, inject_into_pod_spec, proxy_secret_name, SecretSync};
use crate::types::{DeploymentConfig, ProxyConfig};
use crate::workloads::{list_candidates, PodTemplated, Workload, WorkloadKind};
use futures::StreamExt;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use kube::{
    api::PostParams,
    runtime::{controller::Action, Controller},
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

pub struct ProxyConfigReconciler {
    client: Client,
    config: Config,
}

impl ProxyConfigReconciler {
    pub fn new(client: Client, config: Config) -> Self {
        Self { client, config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let proxy_configs: Api<ProxyConfig> = match &self.config.watch_namespace {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };
        let context = Arc::new(self);

        Controller::new(proxy_configs, WatcherConfig::default())
            .shutdown_on_signal()
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled proxy config: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }

    /// One reconcile pass for the ProxyConfig `namespace/name`.
    ///
    /// Only a failure to read the ProxyConfig or to list a workload kind is
    /// returned as an error. Resolver failures fall back to empty settings and
    /// per-workload failures are logged and counted.
    #[instrument(skip(self))]
    pub async fn reconcile_proxy_config(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<ReconcileOutcome> {
        let proxy_configs: Api<ProxyConfig> = Api::namespaced(self.client.clone(), namespace);

        let Some(proxy_config) = proxy_configs.get_opt(name).await? else {
            info!("ProxyConfig {}/{} not found, nothing to do", namespace, name);
            return Ok(ReconcileOutcome::not_found());
        };

        info!(
            "Reconciling ProxyConfig {}/{}, proxySource: {}",
            namespace, name, proxy_config.spec.proxy_source
        );

        let mut outcome = ReconcileOutcome {
            found: true,
            ..Default::default()
        };

        let settings = match resolve(&self.client, &proxy_config, &self.config.policy).await {
            Ok(settings) => settings,
            Err(e) => {
                error!("Failed to resolve proxy settings, continuing with empty values: {}", e);
                outcome.resolver_failed_open = true;
                ProxySettings::default()
            }
        };

        for kind in WorkloadKind::ALL {
            let summary = match kind {
                WorkloadKind::Deployment => {
                    self.sync_kind::<Deployment>(namespace, &settings).await?
                }
                WorkloadKind::DeploymentConfig => {
                    self.sync_kind::<DeploymentConfig>(namespace, &settings).await?
                }
                WorkloadKind::StatefulSet => {
                    self.sync_kind::<StatefulSet>(namespace, &settings).await?
                }
                WorkloadKind::DaemonSet => self.sync_kind::<DaemonSet>(namespace, &settings).await?,
                WorkloadKind::Job => self.count_kind::<Job>(namespace).await?,
                WorkloadKind::CronJob => self.sync_kind::<CronJob>(namespace, &settings).await?,
            };
            outcome.kinds.push((kind, summary));
        }

        info!(
            "Reconciled ProxyConfig {}/{}: {} workloads updated, {} failed",
            namespace,
            name,
            outcome.total_updated(),
            outcome.total_failed()
        );

        Ok(outcome)
    }

    /// Discover one kind without touching it
    async fn count_kind<K: Workload>(&self, namespace: &str) -> Result<KindSummary> {
        let candidates = list_candidates::<K>(&self.client, namespace).await?;
        info!("Found {} {}s", candidates.len(), K::KIND);
        Ok(KindSummary::discovered_only(candidates.len()))
    }

    async fn sync_kind<K: PodTemplated>(
        &self,
        namespace: &str,
        settings: &ProxySettings,
    ) -> Result<KindSummary> {
        let candidates = list_candidates::<K>(&self.client, namespace).await?;
        info!("Found {} {}s", candidates.len(), K::KIND);

        let api: Api<K> = Api::namespaced(self.client.clone(), namespace);
        let mut summary = KindSummary::discovered_only(candidates.len());

        for workload in candidates {
            let outcome = self.sync_workload(&api, namespace, workload, settings).await;
            summary.record(outcome);
        }

        Ok(summary)
    }

    async fn sync_workload<K: PodTemplated>(
        &self,
        api: &Api<K>,
        namespace: &str,
        mut workload: K,
        settings: &ProxySettings,
    ) -> ItemOutcome {
        let name = workload.name_any();
        let secret_name = proxy_secret_name(&workload);
        let policy = &self.config.policy;

        match ensure_secret(
            &self.client,
            &secret_name,
            namespace,
            settings,
            policy.secret_conflict_retries,
        )
        .await
        {
            Ok(SecretSync::Unchanged) => {}
            Ok(sync) => debug!(
                "Proxy Secret {}/{} for {} {}: {:?}",
                namespace,
                secret_name,
                K::KIND,
                name,
                sync
            ),
            Err(e) => {
                error!(
                    "Failed to sync proxy Secret {}/{} for {} {}: {}",
                    namespace,
                    secret_name,
                    K::KIND,
                    name,
                    e
                );
                return ItemOutcome::Failed;
            }
        }

        let changed = workload.pod_spec_mut().is_some_and(|pod_spec| {
            inject_into_pod_spec(pod_spec, &secret_name, settings, policy.remove_empty_proxy_env)
        });

        if !changed {
            debug!("{} {}/{} already up to date", K::KIND, namespace, name);
            return ItemOutcome::Unchanged;
        }

        match api.replace(&name, &PostParams::default(), &workload).await {
            Ok(_) => {
                info!("Updated {} {}/{}", K::KIND, namespace, name);
                ItemOutcome::Updated
            }
            Err(e) => {
                error!("Failed to update {} {}/{}: {}", K::KIND, namespace, name, e);
                ItemOutcome::Failed
            }
        }
    }
}

async fn reconcile(
    proxy_config: Arc<ProxyConfig>,
    ctx: Arc<ProxyConfigReconciler>,
) -> Result<Action> {
    let name = proxy_config.name_any();
    let namespace = proxy_config
        .namespace()
        .ok_or(ProxyConfigError::MissingObjectKey(".metadata.namespace"))?;
    let timeout = ctx.config.reconcile_timeout;

    match tokio::time::timeout(timeout, ctx.reconcile_proxy_config(&namespace, &name)).await {
        Ok(outcome) => {
            outcome?;
            Ok(Action::await_change())
        }
        Err(_) => Err(ProxyConfigError::ReconcileTimeout(timeout)),
    }
}

fn error_policy(
    _proxy_config: Arc<ProxyConfig>,
    error: &ProxyConfigError,
    ctx: Arc<ProxyConfigReconciler>,
) -> Action {
    error!("Reconciliation error: {}", error);
    Action::requeue(ctx.config.error_requeue)
}
