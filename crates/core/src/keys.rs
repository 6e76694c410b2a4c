// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! KV key grammar (bit-exact with spec §6):
//!
//! ```text
//! jobs.<job-id>
//! status.<job-id>.<event>.<sanitized-host>.<unix-nano>[.<seq>]
//! responses.<job-id>.<sanitized-host>.<unix-nano>[.<seq>]
//! workers.<sanitized-host>
//! ```
//!
//! `.<seq>` is only appended when the clock disambiguator is nonzero; see
//! [`crate::clock::EventStamp::key_suffix`].

use crate::clock::EventStamp;
use crate::event::EventKind;
use crate::job::JobId;
use crate::sanitize::sanitize;

pub fn job_key(id: &JobId) -> String {
    format!("jobs.{id}")
}

pub fn status_key(job_id: &JobId, event: EventKind, host: &str, stamp: EventStamp) -> String {
    format!("status.{job_id}.{event}.{}.{}", sanitize(host), stamp.key_suffix())
}

pub fn response_key(job_id: &JobId, host: &str, stamp: EventStamp) -> String {
    format!("responses.{job_id}.{}.{}", sanitize(host), stamp.key_suffix())
}

pub fn worker_key(host: &str) -> String {
    format!("workers.{}", sanitize(host))
}

pub fn status_prefix(job_id: &JobId) -> String {
    format!("status.{job_id}.")
}

pub fn response_prefix(job_id: &JobId) -> String {
    format!("responses.{job_id}.")
}

/// Error parsing a `status.*` or `responses.*` key into its components.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("key {0:?} has too few dot-separated components")]
    TooFewComponents(String),
    #[error("key {0:?} has unrecognized event {1:?}")]
    UnknownEvent(String, String),
    #[error("key {0:?} has non-numeric unix_nano component {1:?}")]
    BadUnixNano(String, String),
}

/// Parsed components of a `status.<job-id>.<event>.<host>.<nanos>[.<seq>]` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStatusKey {
    pub job_id: String,
    pub event: EventKind,
    pub sanitized_host: String,
    pub unix_nano: i64,
}

/// Parse a `status.*` key, tolerating the key grammar described above.
///
/// Used by list/scan code paths that must skip unparseable entries rather
/// than fail the whole scan (spec §7's tolerance for malformed registry and
/// history entries extends to any bucket scan).
pub fn parse_status_key(key: &str) -> Result<ParsedStatusKey, KeyParseError> {
    let parts: Vec<&str> = key.split('.').collect();
    // status . <job-id> . <event> . <host> . <nanos> [ . <seq> ]
    if parts.len() < 5 || parts[0] != "status" {
        return Err(KeyParseError::TooFewComponents(key.to_string()));
    }
    let event = match parts[2] {
        "submitted" => EventKind::Submitted,
        "acknowledged" => EventKind::Acknowledged,
        "started" => EventKind::Started,
        "completed" => EventKind::Completed,
        "failed" => EventKind::Failed,
        "retried" => EventKind::Retried,
        other => return Err(KeyParseError::UnknownEvent(key.to_string(), other.to_string())),
    };
    let unix_nano = parts[4]
        .parse::<i64>()
        .map_err(|_| KeyParseError::BadUnixNano(key.to_string(), parts[4].to_string()))?;
    Ok(ParsedStatusKey {
        job_id: parts[1].to_string(),
        event,
        sanitized_host: parts[3].to_string(),
        unix_nano,
    })
}

#[cfg(test)]
#[path = "keys_tests.rs"]
mod tests;
