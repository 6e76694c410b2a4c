// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An agent's answer to a job, as stored under
//! `responses.<job-id>.<sanitized-host>.<unix-nano>[.<seq>]`.

use serde::{Deserialize, Serialize};

/// Terminal outcome an agent reports for one (job, host) attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Completed,
    Failed,
}

impl std::fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ResponseStatus::Completed => "completed",
            ResponseStatus::Failed => "failed",
        })
    }
}

/// One agent's response to a job.
///
/// At most one per (job, agent) attempt is meaningful to the reducer;
/// duplicates are tolerated, with the latest timestamp winning when
/// collapsing in memory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub status: ResponseStatus,
    /// Raw provider output, opaque to this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether the operation changed system state (providers may leave this
    /// unset when the concept doesn't apply).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<bool>,
    pub hostname: String,
    /// RFC3339 with nanoseconds.
    pub timestamp: String,
}

impl Response {
    pub fn completed(hostname: impl Into<String>, timestamp: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            status: ResponseStatus::Completed,
            data: Some(data),
            error: None,
            changed: None,
            hostname: hostname.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn failed(hostname: impl Into<String>, timestamp: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Failed,
            data: None,
            error: Some(error.into()),
            changed: None,
            hostname: hostname.into(),
            timestamp: timestamp.into(),
        }
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
