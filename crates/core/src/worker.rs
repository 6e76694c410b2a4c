// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent registration record, as stored under `workers.<sanitized-host>`.
//!
//! The bucket carries its own TTL; absence of an entry implies the agent is
//! no longer live. This crate only models the record shape, not the
//! heartbeat loop that writes it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `{hostname, labels, registered_at}` written by an agent's heartbeat loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkerRegistration {
    pub hostname: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// RFC3339 with nanoseconds, refreshed on every heartbeat tick.
    pub registered_at: String,
}

impl WorkerRegistration {
    pub fn new(hostname: impl Into<String>, labels: BTreeMap<String, String>, registered_at: impl Into<String>) -> Self {
        Self { hostname: hostname.into(), labels, registered_at: registered_at.into() }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
