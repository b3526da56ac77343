// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Proxy settings resolution from the ProxyConfig or the OpenShift platform.

pub mod platform;
pub mod settings;

pub use settings::{resolve, ProxySettings};
