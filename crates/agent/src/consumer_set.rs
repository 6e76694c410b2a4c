// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds the full set of durable consumer configurations an agent attaches
//! on startup (spec §4.5 step 2): `_any` (queue-group load balanced),
//! `_all` (personal fan-out), `host.<identity>` (personal), and one
//! personal consumer per label prefix depth.

use oj_bus::ConsumerConfig;
use oj_core::sanitize::sanitized_segments;
use oj_core::subject::{label_prefix_subjects, Namespace};

use crate::config::{AgentIdentity, ConsumerTuning};

/// One durable consumer this agent must attach, alongside whether it's
/// shared (queue group) or personal.
pub struct ConsumerSpec {
    pub config: ConsumerConfig,
}

/// Build every consumer this agent attaches across both namespaces, per the
/// naming template in spec §4.5.
pub fn build_consumer_set(
    identity: &AgentIdentity,
    queue_group: &str,
    tuning: &ConsumerTuning,
) -> Vec<ConsumerSpec> {
    let mut specs = Vec::new();
    for namespace in [Namespace::Query, Namespace::Modify] {
        specs.push(any_consumer(namespace, queue_group, tuning));
        specs.push(all_consumer(namespace, identity, tuning));
        specs.push(host_consumer(namespace, identity, tuning));
        for (key, value) in &identity.labels {
            specs.extend(label_consumers(namespace, key, value, identity, tuning));
        }
    }
    specs
}

fn ns_tag(namespace: Namespace) -> &'static str {
    match namespace {
        Namespace::Query => "query",
        Namespace::Modify => "modify",
    }
}

fn any_consumer(namespace: Namespace, queue_group: &str, tuning: &ConsumerTuning) -> ConsumerSpec {
    let durable_name = format!("{}_any", ns_tag(namespace));
    let subject = format!("{}._any", namespace.prefix());
    let config = tuning
        .apply(ConsumerConfig::new(durable_name, subject))
        .with_queue_group(queue_group);
    ConsumerSpec { config }
}

fn all_consumer(namespace: Namespace, identity: &AgentIdentity, tuning: &ConsumerTuning) -> ConsumerSpec {
    let durable_name = format!("{}_all_{}", ns_tag(namespace), identity.identity);
    let subject = format!("{}._all", namespace.prefix());
    ConsumerSpec { config: tuning.apply(ConsumerConfig::new(durable_name, subject)) }
}

fn host_consumer(namespace: Namespace, identity: &AgentIdentity, tuning: &ConsumerTuning) -> ConsumerSpec {
    let durable_name = format!("{}_host_{}", ns_tag(namespace), identity.identity);
    let subject = format!("{}.host.{}", namespace.prefix(), identity.identity);
    ConsumerSpec { config: tuning.apply(ConsumerConfig::new(durable_name, subject)) }
}

fn label_consumers(
    namespace: Namespace,
    key: &str,
    value: &str,
    identity: &AgentIdentity,
    tuning: &ConsumerTuning,
) -> Vec<ConsumerSpec> {
    let segments = sanitized_segments(value);
    let subjects = label_prefix_subjects(namespace, key, value);
    segments
        .iter()
        .enumerate()
        .zip(subjects)
        .map(|((depth, _), subject)| {
            let prefix_name = segments[..=depth].join("_");
            let durable_name = format!("{}_label_{}_{}_{}", ns_tag(namespace), key, prefix_name, identity.identity);
            ConsumerSpec { config: tuning.apply(ConsumerConfig::new(durable_name, subject)) }
        })
        .collect()
}

#[cfg(test)]
#[path = "consumer_set_tests.rs"]
mod tests;
