// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Routing specs: host-targeted submissions reach only the named host, and
//! label-prefix submissions reach every agent whose label value shares
//! that prefix (spec §4.1, §6).

use std::collections::BTreeMap;

use oj_core::{Operation, Target};

use crate::support::new_fabric;

#[tokio::test]
async fn host_target_reaches_only_the_named_agent() {
    let fabric = new_fabric();
    let a = fabric.spawn_agent("workerA", BTreeMap::new(), Vec::new()).await;
    let b = fabric.spawn_agent("workerB", BTreeMap::new(), Vec::new()).await;
    let client = fabric.client();

    let (_id, response) = client
        .publish_and_wait(Operation::new("node.hostname.get", serde_json::json!({})), Target::host("workerB"))
        .await
        .unwrap();

    assert_eq!(response.hostname, "workerB");

    a.shutdown().await;
    b.shutdown().await;
}

#[tokio::test]
async fn label_prefix_target_reaches_every_agent_sharing_that_prefix() {
    let fabric = new_fabric();

    let mut west_labels = BTreeMap::new();
    west_labels.insert("region".to_string(), "us.west.prod".to_string());
    let west = fabric.spawn_agent("west1", west_labels, Vec::new()).await;

    let mut east_labels = BTreeMap::new();
    east_labels.insert("region".to_string(), "us.east.prod".to_string());
    let east = fabric.spawn_agent("east1", east_labels, Vec::new()).await;

    let client = fabric.client();

    let (_id, responses) = client
        .publish_and_collect(Operation::new("node.hostname.get", serde_json::json!({})), Target::label("region", "us"))
        .await
        .unwrap();

    assert_eq!(responses.len(), 2);
    assert!(responses.contains_key("west1"));
    assert!(responses.contains_key("east1"));

    let (_id, narrowed) = client
        .publish_and_collect(Operation::new("node.hostname.get", serde_json::json!({})), Target::label("region", "us.west"))
        .await
        .unwrap();

    assert_eq!(narrowed.len(), 1);
    assert!(narrowed.contains_key("west1"));

    west.shutdown().await;
    east.shutdown().await;
}
