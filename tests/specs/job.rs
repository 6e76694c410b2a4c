// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end job lifecycle specs: submit, wait/collect for a response,
//! list with filtering and pagination, retry, delete.

use std::collections::BTreeMap;

use oj_core::Operation;
use oj_reducer::AggregateStatus;

use crate::support::new_fabric;

#[tokio::test]
async fn publish_and_wait_round_trips_through_a_real_agent() {
    let fabric = new_fabric();
    let agent = fabric.spawn_agent("workerA", BTreeMap::new(), Vec::new()).await;
    let client = fabric.client();

    let (job_id, response) = client
        .publish_and_wait(Operation::new("node.hostname.get", serde_json::json!({})), "_any".parse().unwrap())
        .await
        .unwrap();

    assert_eq!(response.hostname, "workerA");
    assert_eq!(response.data.unwrap()["hostname"], "workerA");

    let status = client.get_job_status(&job_id).await.unwrap();
    assert_eq!(status.reduced.status, AggregateStatus::Completed);

    agent.shutdown().await;
}

#[tokio::test]
async fn publish_and_collect_gathers_every_agent_under_all() {
    let fabric = new_fabric();
    let a = fabric.spawn_agent("workerA", BTreeMap::new(), Vec::new()).await;
    let b = fabric.spawn_agent("workerB", BTreeMap::new(), Vec::new()).await;
    let client = fabric.client();

    let (_job_id, responses) = client
        .publish_and_collect(Operation::new("node.hostname.get", serde_json::json!({})), "_all".parse().unwrap())
        .await
        .unwrap();

    assert_eq!(responses.len(), 2);
    assert!(responses.contains_key("workerA"));
    assert!(responses.contains_key("workerB"));

    a.shutdown().await;
    b.shutdown().await;
}

#[tokio::test]
async fn list_jobs_filters_by_status_and_paginates() {
    let fabric = new_fabric();
    let agent = fabric.spawn_agent("workerA", BTreeMap::new(), Vec::new()).await;
    let client = fabric.client();

    for _ in 0..3 {
        client
            .publish_and_wait(Operation::new("node.hostname.get", serde_json::json!({})), "_any".parse().unwrap())
            .await
            .unwrap();
    }

    let all = client.list_jobs(None, 0, 0).await.unwrap();
    assert_eq!(all.total, 3);

    let page = client.list_jobs(None, 2, 0).await.unwrap();
    assert_eq!(page.jobs.len(), 2);
    assert_eq!(page.total, 3);

    let rest = client.list_jobs(None, 2, 2).await.unwrap();
    assert_eq!(rest.jobs.len(), 1);

    let completed = client.list_jobs(Some(AggregateStatus::Completed), 0, 0).await.unwrap();
    assert_eq!(completed.total, 3);

    let failed = client.list_jobs(Some(AggregateStatus::Failed), 0, 0).await.unwrap();
    assert_eq!(failed.total, 0);

    agent.shutdown().await;
}

#[tokio::test]
async fn retry_job_submits_a_new_id_and_annotates_the_original() {
    let fabric = new_fabric();
    let agent = fabric.spawn_agent("workerA", BTreeMap::new(), Vec::new()).await;
    let client = fabric.client();

    let (job_id, _) = client
        .publish_and_wait(Operation::new("node.hostname.get", serde_json::json!({})), "_any".parse().unwrap())
        .await
        .unwrap();

    let retried = client.retry_job(&job_id, "_any".parse().unwrap()).await.unwrap();
    assert_ne!(retried.id, job_id);

    let original_status = client.get_job_status(&job_id).await.unwrap();
    assert!(original_status.reduced.timeline.iter().any(|entry| entry.message.contains("retried")));

    agent.shutdown().await;
}

#[tokio::test]
async fn delete_job_removes_the_record_but_not_its_history() {
    let fabric = new_fabric();
    let agent = fabric.spawn_agent("workerA", BTreeMap::new(), Vec::new()).await;
    let client = fabric.client();

    let (job_id, _) = client
        .publish_and_wait(Operation::new("node.hostname.get", serde_json::json!({})), "_any".parse().unwrap())
        .await
        .unwrap();

    client.delete_job(&job_id).await.unwrap();

    let status_after_delete = client.get_job_status(&job_id).await;
    assert!(status_after_delete.is_err());

    let events = fabric.store.list_status(&job_id).await.unwrap();
    let responses = fabric.store.list_responses(&job_id).await.unwrap();
    assert!(!events.is_empty(), "status history should survive job deletion");
    assert!(!responses.is_empty(), "responses should survive job deletion");

    agent.shutdown().await;
}
