// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry specs: an agent's heartbeat registers it, `list_workers` sees
//! it while running, and a clean shutdown deregisters it (spec §4.6).

use std::collections::BTreeMap;
use std::time::Duration;

use crate::support::new_fabric;

/// The heartbeat's first write happens on a freshly-spawned task; give the
/// scheduler a real tick so it lands before we read the registry back.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

#[tokio::test]
async fn running_agent_is_visible_and_disappears_on_shutdown() {
    let fabric = new_fabric();
    let client = fabric.client();

    let before = client.list_workers().await.unwrap();
    assert!(before.is_empty());

    let mut labels = BTreeMap::new();
    labels.insert("env".to_string(), "staging".to_string());
    let agent = fabric.spawn_agent("workerA", labels, Vec::new()).await;
    settle().await;

    let during = client.list_workers().await.unwrap();
    assert_eq!(during.len(), 1);
    assert_eq!(during[0].hostname, "workerA");
    assert_eq!(during[0].labels.get("env").map(String::as_str), Some("staging"));

    agent.shutdown().await;

    let after = client.list_workers().await.unwrap();
    assert!(after.is_empty());
}

#[tokio::test]
async fn multiple_agents_register_independently() {
    let fabric = new_fabric();
    let client = fabric.client();

    let a = fabric.spawn_agent("workerA", BTreeMap::new(), Vec::new()).await;
    let b = fabric.spawn_agent("workerB", BTreeMap::new(), Vec::new()).await;
    settle().await;

    let workers = client.list_workers().await.unwrap();
    assert_eq!(workers.len(), 2);

    a.shutdown().await;

    let remaining = client.list_workers().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].hostname, "workerB");

    b.shutdown().await;
}
