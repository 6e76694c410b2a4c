// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use oj_core::{FakeClock, Job, Operation, Target};

use super::*;
use crate::memory::MemoryKv;

fn store() -> JobStore<FakeClock> {
    JobStore::new(Arc::new(MemoryKv::new()), FakeClock::new())
}

fn sample_job(clock: &FakeClock) -> Job {
    Job::new(
        Target::host("web-1"),
        Operation::new("node.hostname.get", serde_json::json!({})),
        clock.event_stamp(),
    )
}

#[tokio::test]
async fn put_then_get_job_round_trips() {
    let clock = FakeClock::new();
    let store = JobStore::new(Arc::new(MemoryKv::new()), clock.clone());
    let job = sample_job(&clock);

    store.put_job(&job).await.unwrap();
    let fetched = store.get_job(&job.id).await.unwrap().unwrap();
    assert_eq!(fetched, job);
}

#[tokio::test]
async fn get_missing_job_is_none() {
    let store = store();
    assert!(store.get_job(&oj_core::JobId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_job_removes_only_the_job_record() {
    let clock = FakeClock::new();
    let store = JobStore::new(Arc::new(MemoryKv::new()), clock.clone());
    let job = sample_job(&clock);
    store.put_job(&job).await.unwrap();
    store.append_status(&job.id, EventKind::Submitted, oj_core::API_HOSTNAME, None).await.unwrap();

    store.delete_job(&job.id).await.unwrap();

    assert!(store.get_job(&job.id).await.unwrap().is_none());
    assert_eq!(store.list_status(&job.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn append_status_key_and_payload_share_one_clock_read() {
    let store = store();
    let job_id = JobId::new();
    let event = store.append_status(&job_id, EventKind::Started, "web-1", None).await.unwrap();
    assert_eq!(event.hostname, "web-1");

    let listed = store.list_status(&job_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].unix_nano, event.unix_nano);
}

#[tokio::test]
async fn append_response_is_retrievable_under_the_job_prefix() {
    let store = store();
    let job_id = JobId::new();
    let response = Response::completed("web-1", "ignored-overwritten-by-store", serde_json::json!({"ok": true}));
    store.append_response(&job_id, &response).await.unwrap();

    let responses = store.list_responses(&job_id).await.unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].hostname, "web-1");
}

#[tokio::test]
async fn list_status_skips_unparseable_entries() {
    let kv = Arc::new(MemoryKv::new());
    let store = JobStore::new(kv.clone(), FakeClock::new());
    let job_id = JobId::new();
    store.append_status(&job_id, EventKind::Started, "web-1", None).await.unwrap();
    kv.put(&format!("status.{job_id}.started.web-2.99"), Bytes::from_static(b"not json")).await.unwrap();

    let events = store.list_status(&job_id).await.unwrap();
    assert_eq!(events.len(), 1);
}

#[tokio::test]
async fn list_job_ids_strips_the_jobs_prefix() {
    let clock = FakeClock::new();
    let store = JobStore::new(Arc::new(MemoryKv::new()), clock.clone());
    let job = sample_job(&clock);
    store.put_job(&job).await.unwrap();

    let ids = store.list_job_ids().await.unwrap();
    assert_eq!(ids, vec![job.id.as_str().to_string()]);
}

#[tokio::test]
async fn watch_responses_observes_new_entries_for_its_job_only() {
    let store = store();
    let job_id = JobId::new();
    let other_job_id = JobId::new();
    let mut rx = store.watch_responses(&job_id).await.unwrap();

    store.append_response(&job_id, &Response::completed("web-1", "t", serde_json::json!(null))).await.unwrap();
    store.append_response(&other_job_id, &Response::completed("web-2", "t", serde_json::json!(null))).await.unwrap();

    let event = rx.recv().await.unwrap();
    match event {
        KvEvent::Put { key, .. } => assert!(key.starts_with(&format!("responses.{job_id}."))),
        KvEvent::Delete { .. } => panic!("expected a put"),
    }
}

#[tokio::test]
async fn worker_put_list_and_delete_round_trip() {
    let store = store();
    store.put_worker("web-1", Bytes::from_static(b"{\"hostname\":\"web-1\"}")).await.unwrap();
    assert_eq!(store.list_workers_raw().await.unwrap().len(), 1);

    store.delete_worker("web-1").await.unwrap();
    assert!(store.list_workers_raw().await.unwrap().is_empty());
}
