// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::job::JobId;

#[test]
fn job_key_has_no_trailing_components() {
    let id = JobId::from_string("job_abc123");
    assert_eq!(job_key(&id), "jobs.job_abc123");
}

#[test]
fn status_key_sanitizes_host_and_omits_seq_when_zero() {
    let id = JobId::from_string("job_abc123");
    let stamp = EventStamp { unix_nano: 1_700_000_000_000_000_000, seq: 0 };
    let key = status_key(&id, EventKind::Started, "web-1.prod", stamp);
    assert_eq!(key, "status.job_abc123.started.web-1_prod.1700000000000000000");
}

#[test]
fn status_key_appends_seq_when_nonzero() {
    let id = JobId::from_string("job_abc123");
    let stamp = EventStamp { unix_nano: 1_700_000_000_000_000_000, seq: 2 };
    let key = status_key(&id, EventKind::Started, "web-1", stamp);
    assert_eq!(key, "status.job_abc123.started.web-1.1700000000000000000.2");
}

#[test]
fn response_key_matches_grammar() {
    let id = JobId::from_string("job_abc123");
    let stamp = EventStamp { unix_nano: 42, seq: 0 };
    assert_eq!(response_key(&id, "web-1", stamp), "responses.job_abc123.web-1.42");
}

#[test]
fn worker_key_sanitizes_host() {
    assert_eq!(worker_key("web-1.prod"), "workers.web-1_prod");
}

#[test]
fn prefixes_scope_to_a_single_job() {
    let id = JobId::from_string("job_abc123");
    assert_eq!(status_prefix(&id), "status.job_abc123.");
    assert_eq!(response_prefix(&id), "responses.job_abc123.");
}

#[test]
fn parse_status_key_round_trips_without_seq() {
    let parsed = parse_status_key("status.job_abc123.completed.web-1.1700000000000000000").unwrap();
    assert_eq!(parsed.job_id, "job_abc123");
    assert_eq!(parsed.event, EventKind::Completed);
    assert_eq!(parsed.sanitized_host, "web-1");
    assert_eq!(parsed.unix_nano, 1_700_000_000_000_000_000);
}

#[test]
fn parse_status_key_tolerates_trailing_seq() {
    let parsed = parse_status_key("status.job_abc123.completed.web-1.42.3").unwrap();
    assert_eq!(parsed.unix_nano, 42);
}

#[test]
fn parse_status_key_rejects_unknown_event() {
    let err = parse_status_key("status.job_abc123.bogus.web-1.42").unwrap_err();
    assert!(matches!(err, KeyParseError::UnknownEvent(_, _)));
}

#[test]
fn parse_status_key_rejects_too_few_components() {
    let err = parse_status_key("status.job_abc123").unwrap_err();
    assert!(matches!(err, KeyParseError::TooFewComponents(_)));
}

#[test]
fn parse_status_key_rejects_non_numeric_nanos() {
    let err = parse_status_key("status.job_abc123.completed.web-1.not-a-number").unwrap_err();
    assert!(matches!(err, KeyParseError::BadUnixNano(_, _)));
}
