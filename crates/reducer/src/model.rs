// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output shape of the status reducer.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use oj_core::Response;
use serde::{Deserialize, Serialize};

/// The aggregate status of a job, folded across every host that has
/// touched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateStatus {
    /// `W == ∅`: no non-dispatcher host has any event yet.
    Submitted,
    /// At least one host is `acknowledged` or `started`.
    Processing,
    /// Every host reached `completed`.
    Completed,
    /// Every host reached `failed`.
    Failed,
    /// Terminal hosts disagree: some completed, some failed.
    PartialFailure,
}

impl AggregateStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, AggregateStatus::Completed | AggregateStatus::Failed | AggregateStatus::PartialFailure)
    }
}

impl std::fmt::Display for AggregateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AggregateStatus::Submitted => "submitted",
            AggregateStatus::Processing => "processing",
            AggregateStatus::Completed => "completed",
            AggregateStatus::Failed => "failed",
            AggregateStatus::PartialFailure => "partial_failure",
        })
    }
}

/// A single host's per-job progress, per the state machine in spec §4.3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostState {
    pub status: HostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// `completed_at - started_at`, in milliseconds. Always non-negative;
    /// repeated `started` events from redelivery never shrink the window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostStatus {
    Acknowledged,
    Started,
    Completed,
    Failed,
}

impl HostStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, HostStatus::Completed | HostStatus::Failed)
    }
}

/// One reconstructed timeline entry: `{timestamp, event, hostname, message, error?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub timestamp: DateTime<Utc>,
    pub event: String,
    pub hostname: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Full reconstructed status for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedStatus {
    pub status: AggregateStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_host: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub per_host: BTreeMap<String, HostState>,
    pub timeline: Vec<TimelineEntry>,
    pub responses: BTreeMap<String, Response>,
}
