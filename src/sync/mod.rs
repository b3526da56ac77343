// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Proxy Secret synchronisation and workload environment injection.

pub mod env;
pub mod secrets;

pub use env::inject_into_pod_spec;
pub use secrets::{ensure_secret, proxy_secret_name, SecretSync};
