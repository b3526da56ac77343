// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Per-reconcile bookkeeping of what happened to each candidate workload.

use crate::workloads::WorkloadKind;

/// Result of processing a single candidate workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The workload was rewritten
    Updated,
    /// Secret in sync and env already correct, no write issued
    Unchanged,
    /// Secret sync or workload update failed; logged and skipped
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KindSummary {
    pub discovered: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl KindSummary {
    /// Summary for a kind that is listed but never modified
    pub fn discovered_only(discovered: usize) -> Self {
        KindSummary {
            discovered,
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Updated => self.updated += 1,
            ItemOutcome::Unchanged => self.unchanged += 1,
            ItemOutcome::Failed => self.failed += 1,
        }
    }
}

/// What a reconcile did. A reconcile that returns this succeeded, however
/// many individual items failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// False when the ProxyConfig no longer exists
    pub found: bool,
    /// The proxy source could not be read and empty settings were used
    pub resolver_failed_open: bool,
    pub kinds: Vec<(WorkloadKind, KindSummary)>,
}

impl ReconcileOutcome {
    pub fn not_found() -> Self {
        ReconcileOutcome::default()
    }

    pub fn summary(&self, kind: WorkloadKind) -> Option<&KindSummary> {
        self.kinds.iter().find(|(k, _)| *k == kind).map(|(_, s)| s)
    }

    pub fn total_failed(&self) -> usize {
        self.kinds.iter().map(|(_, s)| s.failed).sum()
    }

    pub fn total_updated(&self) -> usize {
        self.kinds.iter().map(|(_, s)| s.updated).sum()
    }
}
