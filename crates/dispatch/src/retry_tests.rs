// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use oj_core::{EventKind, JobId, Operation};

use crate::error::DispatchError;
use crate::support::new_client;

#[tokio::test]
async fn retry_creates_new_job_and_marks_original() {
    let client = new_client();
    let original =
        client.create_job(Operation::new("node.hostname.get", serde_json::json!({})), "host:w1".parse().unwrap()).await.unwrap();

    client.store().append_status(&original.id, EventKind::Acknowledged, "w1", None).await.unwrap();
    client
        .store()
        .append_status(&original.id, EventKind::Failed, "w1", Some(serde_json::json!({"error": "timeout"})))
        .await
        .unwrap();

    let retried = client.retry_job(&original.id, "_any".parse().unwrap()).await.unwrap();
    assert_ne!(retried.id, original.id);

    let original_events = client.store().list_status(&original.id).await.unwrap();
    let retried_event = original_events.iter().find(|e| e.event == EventKind::Retried).expect("retried event present");
    assert_eq!(retried_event.data.as_ref().unwrap()["new_job_id"], retried.id.to_string());

    let new_job = client.store().get_job(&retried.id).await.unwrap().expect("new job persisted");
    assert_eq!(new_job.operation.op_type, "node.hostname.get");
}

#[tokio::test]
async fn retry_missing_job_is_not_found() {
    let client = new_client();
    let result = client.retry_job(&JobId::new(), "_any".parse().unwrap()).await;
    assert!(matches!(result, Err(DispatchError::JobNotFound(_))));
}

#[tokio::test]
async fn delete_removes_job_but_keeps_history() {
    let client = new_client();
    let result = client.create_job(Operation::new("node.hostname.get", serde_json::json!({})), "_any".parse().unwrap()).await.unwrap();

    client.delete_job(&result.id).await.unwrap();

    assert!(client.store().get_job(&result.id).await.unwrap().is_none());
    assert!(!client.store().list_status(&result.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_job_is_not_found() {
    let client = new_client();
    let result = client.delete_job(&JobId::new()).await;
    assert!(matches!(result, Err(DispatchError::JobNotFound(_))));
}
