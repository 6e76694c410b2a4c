// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::BTreeMap;

use super::*;

fn identity() -> AgentIdentity {
    let mut labels = BTreeMap::new();
    labels.insert("group".to_string(), "web.dev.us-east".to_string());
    AgentIdentity::new("worker-1.example.com", labels)
}

#[test]
fn builds_any_all_host_and_label_consumers_per_namespace() {
    let identity = identity();
    let tuning = ConsumerTuning::default();
    let specs = build_consumer_set(&identity, "oj-agents", &tuning);

    // _any + _all + host + 3 label-depth consumers, times 2 namespaces.
    assert_eq!(specs.len(), 12);

    let any_query = specs.iter().find(|s| s.config.durable_name == "query_any").expect("_any consumer present");
    assert_eq!(any_query.config.filter_subject, "jobs.query._any");
    assert_eq!(any_query.config.queue_group.as_deref(), Some("oj-agents"));

    let all_modify = specs.iter().find(|s| s.config.durable_name == "modify_all_worker-1_example_com").unwrap();
    assert_eq!(all_modify.config.filter_subject, "jobs.modify._all");
    assert!(all_modify.config.queue_group.is_none());

    let host_query =
        specs.iter().find(|s| s.config.durable_name == "query_host_worker-1_example_com").unwrap();
    assert_eq!(host_query.config.filter_subject, "jobs.query.host.worker-1_example_com");

    let label_depth1 = specs
        .iter()
        .find(|s| s.config.durable_name == "query_label_group_web_worker-1_example_com")
        .expect("depth-1 label consumer present");
    assert_eq!(label_depth1.config.filter_subject, "jobs.query.label.group.web");

    let label_depth3 = specs
        .iter()
        .find(|s| s.config.durable_name == "query_label_group_web_dev_us-east_worker-1_example_com")
        .expect("depth-3 label consumer present");
    assert_eq!(label_depth3.config.filter_subject, "jobs.query.label.group.web.dev.us-east");
}

#[test]
fn tuning_is_applied_to_every_consumer() {
    let identity = identity();
    let mut tuning = ConsumerTuning::default();
    tuning.max_ack_pending = 7;
    let specs = build_consumer_set(&identity, "oj-agents", &tuning);
    assert!(specs.iter().all(|s| s.config.max_ack_pending == 7));
}
