// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom and platform resource types.

pub mod openshift;
pub mod proxy_config;

pub use openshift::{DeploymentConfig, Infrastructure, Proxy};
pub use proxy_config::{ProxyConfig, ProxyConfigSpec, ProxyDefinition, ProxySource};
