// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Workload kinds the operator discovers, and how to reach their pod templates.
//!
//! Every kind implements [`Workload`] so it can be listed by label. Kinds the
//! operator rewrites additionally implement [`PodTemplated`]. `Job` is only a
//! [`Workload`]: opted-in Jobs are counted but never modified.

pub mod discovery;

pub use discovery::{is_opted_in, list_candidates, opt_in_selector};

use crate::types::DeploymentConfig;
use k8s_openapi::api::apps::v1::{DaemonSet, Deployment, StatefulSet};
use k8s_openapi::api::batch::v1::{CronJob, Job};
use k8s_openapi::api::core::v1::PodSpec;
use k8s_openapi::NamespaceResourceScope;
use kube::Resource;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkloadKind {
    Deployment,
    DeploymentConfig,
    StatefulSet,
    DaemonSet,
    Job,
    CronJob,
}

impl WorkloadKind {
    /// Processing order within a reconcile
    pub const ALL: [WorkloadKind; 6] = [
        WorkloadKind::Deployment,
        WorkloadKind::DeploymentConfig,
        WorkloadKind::StatefulSet,
        WorkloadKind::DaemonSet,
        WorkloadKind::Job,
        WorkloadKind::CronJob,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkloadKind::Deployment => "Deployment",
            WorkloadKind::DeploymentConfig => "DeploymentConfig",
            WorkloadKind::StatefulSet => "StatefulSet",
            WorkloadKind::DaemonSet => "DaemonSet",
            WorkloadKind::Job => "Job",
            WorkloadKind::CronJob => "CronJob",
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A namespaced workload type that can be listed by the opt-in label
pub trait Workload:
    Resource<Scope = NamespaceResourceScope, DynamicType = ()>
    + Clone
    + fmt::Debug
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    const KIND: WorkloadKind;
}

/// A workload whose pod template receives the proxy environment
pub trait PodTemplated: Workload {
    /// The pod spec of the template, if the object carries one
    fn pod_spec_mut(&mut self) -> Option<&mut PodSpec>;
}

impl Workload for Deployment {
    const KIND: WorkloadKind = WorkloadKind::Deployment;
}

impl PodTemplated for Deployment {
    fn pod_spec_mut(&mut self) -> Option<&mut PodSpec> {
        self.spec.as_mut()?.template.spec.as_mut()
    }
}

impl Workload for DeploymentConfig {
    const KIND: WorkloadKind = WorkloadKind::DeploymentConfig;
}

impl PodTemplated for DeploymentConfig {
    fn pod_spec_mut(&mut self) -> Option<&mut PodSpec> {
        self.spec.template.as_mut()?.spec.as_mut()
    }
}

impl Workload for StatefulSet {
    const KIND: WorkloadKind = WorkloadKind::StatefulSet;
}

impl PodTemplated for StatefulSet {
    fn pod_spec_mut(&mut self) -> Option<&mut PodSpec> {
        self.spec.as_mut()?.template.spec.as_mut()
    }
}

impl Workload for DaemonSet {
    const KIND: WorkloadKind = WorkloadKind::DaemonSet;
}

impl PodTemplated for DaemonSet {
    fn pod_spec_mut(&mut self) -> Option<&mut PodSpec> {
        self.spec.as_mut()?.template.spec.as_mut()
    }
}

// Discovery only. Injecting into Jobs is not supported.
impl Workload for Job {
    const KIND: WorkloadKind = WorkloadKind::Job;
}

impl Workload for CronJob {
    const KIND: WorkloadKind = WorkloadKind::CronJob;
}

impl PodTemplated for CronJob {
    fn pod_spec_mut(&mut self) -> Option<&mut PodSpec> {
        self.spec
            .as_mut()?
            .job_template
            .spec
            .as_mut()?
            .template
            .spec
            .as_mut()
    }
}
