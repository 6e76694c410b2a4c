// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The provider dispatch table: `operation.type` → black-box handler.
//!
//! Providers are opaque to everything upstream of this module — the
//! dispatch core, the reducer and the bus never see a provider, only the
//! `{type, data}` envelope a provider consumes and the `{data, changed}` or
//! error it produces.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// What a provider returns on success.
#[derive(Debug, Clone)]
pub struct ProviderOutput {
    pub data: serde_json::Value,
    /// Whether the operation changed system state; `None` when the concept
    /// doesn't apply to this provider.
    pub changed: Option<bool>,
}

impl ProviderOutput {
    pub fn new(data: serde_json::Value) -> Self {
        Self { data, changed: None }
    }

    pub fn with_changed(mut self, changed: bool) -> Self {
        self.changed = Some(changed);
        self
    }
}

/// A terminal provider failure (spec §7): the agent writes `failed` plus a
/// failed response, then returns a hard error to the substrate.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// A single black-box operation handler, keyed by its exact `operation.type`
/// string in the registry.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn call(&self, data: serde_json::Value) -> Result<ProviderOutput, ProviderError>;
}

/// The dispatch table a pipeline consults for each job's `operation.type`.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, op_type: impl Into<String>, provider: Arc<dyn Provider>) -> &mut Self {
        self.providers.insert(op_type.into(), provider);
        self
    }

    pub fn get(&self, op_type: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(op_type).cloned()
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
