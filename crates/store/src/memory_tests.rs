// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use bytes::Bytes;

use super::*;

#[tokio::test]
async fn put_then_get_round_trips() {
    let kv = MemoryKv::new();
    kv.put("jobs.job_1", Bytes::from_static(b"{}")).await.unwrap();
    assert_eq!(kv.get("jobs.job_1").await.unwrap(), Some(Bytes::from_static(b"{}")));
}

#[tokio::test]
async fn get_missing_key_is_none() {
    let kv = MemoryKv::new();
    assert_eq!(kv.get("jobs.missing").await.unwrap(), None);
}

#[tokio::test]
async fn delete_removes_the_entry() {
    let kv = MemoryKv::new();
    kv.put("workers.web-1", Bytes::from_static(b"{}")).await.unwrap();
    kv.delete("workers.web-1").await.unwrap();
    assert_eq!(kv.get("workers.web-1").await.unwrap(), None);
}

#[tokio::test]
async fn delete_of_absent_key_is_not_an_error() {
    let kv = MemoryKv::new();
    kv.delete("workers.never-existed").await.unwrap();
}

#[tokio::test]
async fn keys_with_prefix_only_returns_matching_keys() {
    let kv = MemoryKv::new();
    kv.put("status.job_1.started.web-1.1", Bytes::new()).await.unwrap();
    kv.put("status.job_1.completed.web-1.2", Bytes::new()).await.unwrap();
    kv.put("status.job_2.started.web-1.3", Bytes::new()).await.unwrap();

    let mut keys = kv.keys_with_prefix("status.job_1.").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["status.job_1.completed.web-1.2", "status.job_1.started.web-1.1"]);
}

#[tokio::test]
async fn empty_prefix_scan_returns_empty_vec() {
    let kv = MemoryKv::new();
    assert!(kv.keys_with_prefix("status.job_1.").await.unwrap().is_empty());
}

#[tokio::test]
async fn watch_delivers_puts_made_after_subscribing() {
    let kv = MemoryKv::new();
    let mut rx = kv.watch("responses.job_1.").await.unwrap();

    kv.put("responses.job_1.web-1.1", Bytes::from_static(b"{}")).await.unwrap();
    kv.put("jobs.job_2", Bytes::from_static(b"{}")).await.unwrap();

    let event = rx.recv().await.unwrap();
    match event {
        KvEvent::Put { key, .. } => assert_eq!(key, "responses.job_1.web-1.1"),
        KvEvent::Delete { .. } => panic!("expected a put"),
    }
}
