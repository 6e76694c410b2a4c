// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status events: the append-only facts the reducer folds into a job's
//! current status.

use serde::{Deserialize, Serialize};

use crate::job::JobId;

/// The dispatcher's pseudo-hostname for events it produces itself
/// (`submitted`, `retried`). Excluded from per-host tallies.
pub const API_HOSTNAME: &str = "_api";

/// One step in a job's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Submitted,
    Acknowledged,
    Started,
    Completed,
    Failed,
    Retried,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Submitted => "submitted",
            EventKind::Acknowledged => "acknowledged",
            EventKind::Started => "started",
            EventKind::Completed => "completed",
            EventKind::Failed => "failed",
            EventKind::Retried => "retried",
        }
    }

    /// Whether this event ends a job's processing on its host (subject to
    /// `retried`, which stamps the original job rather than ending it).
    pub fn is_terminal(self) -> bool {
        matches!(self, EventKind::Completed | EventKind::Failed)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single status event, as stored under
/// `status.<job-id>.<event>.<sanitized-host>.<unix-nano>[.<seq>]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusEvent {
    pub job_id: JobId,
    pub event: EventKind,
    /// Unsanitized hostname, or [`API_HOSTNAME`] for dispatcher-produced events.
    pub hostname: String,
    /// RFC3339 with nanoseconds.
    pub timestamp: String,
    pub unix_nano: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl StatusEvent {
    pub fn is_from_dispatcher(&self) -> bool {
        self.hostname == API_HOSTNAME
    }

    /// The fixed-template timeline message for this event, per spec §5.
    pub fn timeline_message(&self) -> String {
        match self.event {
            EventKind::Submitted => "Job submitted".to_string(),
            EventKind::Acknowledged => format!("Job acknowledged by worker {}", self.hostname),
            EventKind::Started => format!("Job started by worker {}", self.hostname),
            EventKind::Completed => format!("Job completed by worker {}", self.hostname),
            EventKind::Failed => format!("Job failed on worker {}", self.hostname),
            EventKind::Retried => match self.data.as_ref().and_then(|d| d.get("new_job_id")) {
                Some(new_id) => format!("Job retried as {}", new_id.as_str().unwrap_or(&new_id.to_string())),
                None => "Job retried".to_string(),
            },
        }
    }

    /// The `{error: string}` message, if this is a `failed` event carrying one.
    pub fn error_message(&self) -> Option<&str> {
        if self.event != EventKind::Failed {
            return None;
        }
        self.data.as_ref()?.get("error")?.as_str()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
