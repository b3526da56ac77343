// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod proxy;
pub mod reconcilers;
pub mod sync;
pub mod types;
pub mod workloads;

#[cfg(test)]
mod test_utils;
