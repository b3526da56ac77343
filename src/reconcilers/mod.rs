// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes reconcilers that react to watch events.

pub mod outcome;
pub mod proxy_config;

pub use outcome::{ItemOutcome, KindSummary, ReconcileOutcome};
pub use proxy_config::ProxyConfigReconciler;
