// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use bytes::Bytes;

use super::*;

#[tokio::test]
async fn fanout_consumers_each_receive_every_publish() {
    let bus = MemoryBus::new();
    let mut a = bus.consumer(ConsumerConfig::new("a", "jobs.modify._all")).await.unwrap();
    let mut b = bus.consumer(ConsumerConfig::new("b", "jobs.modify._all")).await.unwrap();

    bus.publish("jobs.modify._all", Bytes::from_static(b"job_1")).await.unwrap();

    assert_eq!(a.next().await.unwrap().payload, Bytes::from_static(b"job_1"));
    assert_eq!(b.next().await.unwrap().payload, Bytes::from_static(b"job_1"));
}

#[tokio::test]
async fn queue_group_load_balances_round_robin() {
    let bus = MemoryBus::new();
    let mut a = bus
        .consumer(ConsumerConfig::new("a", "jobs.modify._any").with_queue_group("workers"))
        .await
        .unwrap();
    let mut b = bus
        .consumer(ConsumerConfig::new("b", "jobs.modify._any").with_queue_group("workers"))
        .await
        .unwrap();

    bus.publish("jobs.modify._any", Bytes::from_static(b"job_1")).await.unwrap();
    bus.publish("jobs.modify._any", Bytes::from_static(b"job_2")).await.unwrap();

    let first = a.next().await.unwrap();
    let second = b.next().await.unwrap();
    assert_eq!(first.payload, Bytes::from_static(b"job_1"));
    assert_eq!(second.payload, Bytes::from_static(b"job_2"));
}

#[tokio::test]
async fn publish_with_no_consumers_is_a_noop() {
    let bus = MemoryBus::new();
    bus.publish("jobs.modify._any", Bytes::from_static(b"job_1")).await.unwrap();
}

#[tokio::test]
async fn nack_requeues_onto_the_same_consumer_with_incremented_attempt() {
    let bus = MemoryBus::new();
    let mut a = bus.consumer(ConsumerConfig::new("a", "jobs.modify._all")).await.unwrap();

    bus.publish("jobs.modify._all", Bytes::from_static(b"job_1")).await.unwrap();
    let delivery = a.next().await.unwrap();
    assert_eq!(delivery.delivery_attempt, 1);
    delivery.nack(Duration::from_millis(1)).await.unwrap();

    let redelivered = a.next().await.unwrap();
    assert_eq!(redelivered.payload, Bytes::from_static(b"job_1"));
    assert_eq!(redelivered.delivery_attempt, 2);
}

#[tokio::test]
async fn ack_and_term_succeed_without_side_effects() {
    let bus = MemoryBus::new();
    let mut a = bus.consumer(ConsumerConfig::new("a", "jobs.modify._all")).await.unwrap();
    bus.publish("jobs.modify._all", Bytes::from_static(b"job_1")).await.unwrap();
    let delivery = a.next().await.unwrap();
    delivery.ack().await.unwrap();
}
