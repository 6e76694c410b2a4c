// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `node.hostname.get`: the one example provider this crate ships, reporting
//! the agent's own registered hostname.

use async_trait::async_trait;

use crate::provider::{Provider, ProviderError, ProviderOutput};

/// Reports the agent's own hostname. Never fails.
pub struct HostnameProvider {
    hostname: String,
}

impl HostnameProvider {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self { hostname: hostname.into() }
    }
}

#[async_trait]
impl Provider for HostnameProvider {
    async fn call(&self, _data: serde_json::Value) -> Result<ProviderOutput, ProviderError> {
        Ok(ProviderOutput::new(serde_json::json!({ "hostname": self.hostname })).with_changed(false))
    }
}

#[cfg(test)]
#[path = "hostname_tests.rs"]
mod tests;
