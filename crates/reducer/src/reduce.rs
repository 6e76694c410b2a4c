// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The pure status reducer: folds a job's status events (and responses)
//! into its current [`ReducedStatus`].
//!
//! Never mutates stored state and never fails: events that don't parse
//! (bad timestamp, unexpected JSON shape) are logged and skipped rather
//! than aborting the fold, per spec §4.3's tolerance clause.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use oj_core::{EventKind, Response, StatusEvent, API_HOSTNAME};
use tracing::warn;

use crate::model::{AggregateStatus, HostState, HostStatus, ReducedStatus, TimelineEntry};

struct ParsedEvent<'a> {
    event: &'a StatusEvent,
    timestamp: DateTime<Utc>,
}

fn parse_events(events: &[StatusEvent]) -> Vec<ParsedEvent<'_>> {
    let mut parsed: Vec<ParsedEvent<'_>> = events
        .iter()
        .filter_map(|event| match DateTime::parse_from_rfc3339(&event.timestamp) {
            Ok(ts) => Some(ParsedEvent { event, timestamp: ts.with_timezone(&Utc) }),
            Err(err) => {
                warn!(job_id = %event.job_id, %err, "skipping status event with unparseable timestamp");
                None
            }
        })
        .collect();
    parsed.sort_by_key(|p| p.timestamp);
    parsed
}

fn timeline_entry(parsed: &ParsedEvent<'_>) -> TimelineEntry {
    TimelineEntry {
        timestamp: parsed.timestamp,
        event: parsed.event.event.to_string(),
        hostname: parsed.event.hostname.clone(),
        message: parsed.event.timeline_message(),
        error: parsed.event.error_message().map(str::to_string),
    }
}

/// Fold a job's events and responses into its current status.
///
/// `events` need not be sorted or deduplicated; `responses` are collapsed
/// one-per-host, latest timestamp wins per spec §3.
pub fn reduce(events: &[StatusEvent], responses: &[Response]) -> ReducedStatus {
    let parsed = parse_events(events);

    let mut per_host: BTreeMap<String, HostState> = BTreeMap::new();
    let mut last_host: Option<String> = None;
    let mut most_recent_failure: Option<(DateTime<Utc>, String)> = None;

    for p in &parsed {
        if p.event.hostname == API_HOSTNAME {
            continue;
        }
        last_host = Some(p.event.hostname.clone());
        let entry = per_host.entry(p.event.hostname.clone()).or_insert_with(|| HostState {
            status: HostStatus::Acknowledged,
            started_at: None,
            completed_at: None,
            duration_ms: None,
            error: None,
        });

        match p.event.event {
            EventKind::Acknowledged => entry.status = HostStatus::Acknowledged,
            EventKind::Started => {
                entry.status = HostStatus::Started;
                if entry.started_at.is_none() {
                    entry.started_at = Some(p.timestamp);
                }
            }
            EventKind::Completed => {
                entry.status = HostStatus::Completed;
                entry.completed_at = Some(p.timestamp);
                entry.error = None;
            }
            EventKind::Failed => {
                entry.status = HostStatus::Failed;
                entry.completed_at = Some(p.timestamp);
                entry.error = p.event.error_message().map(str::to_string);
                if let Some(msg) = &entry.error {
                    most_recent_failure = Some((p.timestamp, msg.clone()));
                }
            }
            // `submitted`/`retried` are dispatcher-only in practice; if one
            // somehow carries a non-`_api` hostname it still registers the
            // host in `W` but doesn't move the per-host state machine.
            EventKind::Submitted | EventKind::Retried => {}
        }
    }

    for entry in per_host.values_mut() {
        entry.duration_ms = match (entry.started_at, entry.completed_at) {
            (Some(started), Some(completed)) => Some((completed - started).num_milliseconds().max(0)),
            _ => None,
        };
    }

    let status = aggregate_status(&per_host);
    let error = match status {
        AggregateStatus::Failed | AggregateStatus::PartialFailure => most_recent_failure.map(|(_, msg)| msg),
        _ => None,
    };

    let updated_at = parsed.last().map(|p| p.timestamp).unwrap_or_else(Utc::now);
    let timeline = parsed.iter().map(timeline_entry).collect();

    let mut collapsed_responses: BTreeMap<String, Response> = BTreeMap::new();
    for response in responses {
        match DateTime::parse_from_rfc3339(&response.timestamp) {
            Ok(ts) => {
                let replace = collapsed_responses
                    .get(&response.hostname)
                    .and_then(|existing| DateTime::parse_from_rfc3339(&existing.timestamp).ok())
                    .map(|existing_ts| ts > existing_ts)
                    .unwrap_or(true);
                if replace {
                    collapsed_responses.insert(response.hostname.clone(), response.clone());
                }
            }
            Err(err) => warn!(hostname = %response.hostname, %err, "skipping response with unparseable timestamp"),
        }
    }

    ReducedStatus { status, error, last_host, updated_at, per_host, timeline, responses: collapsed_responses }
}

fn aggregate_status(per_host: &BTreeMap<String, HostState>) -> AggregateStatus {
    if per_host.is_empty() {
        return AggregateStatus::Submitted;
    }
    if per_host.values().any(|h| !h.status.is_terminal()) {
        return AggregateStatus::Processing;
    }
    let all_completed = per_host.values().all(|h| h.status == HostStatus::Completed);
    if all_completed {
        return AggregateStatus::Completed;
    }
    let all_failed = per_host.values().all(|h| h.status == HostStatus::Failed);
    if all_failed {
        return AggregateStatus::Failed;
    }
    AggregateStatus::PartialFailure
}

#[cfg(test)]
#[path = "reduce_tests.rs"]
mod tests;
