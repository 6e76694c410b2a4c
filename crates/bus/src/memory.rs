// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-process [`MessageBus`] fake for tests: exact-subject routing, queue
//! groups round-robin across their members, personal (non-grouped) consumers
//! each get their own copy, and `nack` requeues onto the same consumer after
//! the requested delay so back-off policy is exercisable without a real
//! substrate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::config::ConsumerConfig;
use crate::error::BusError;
use crate::traits::{Acker, Consumer, Delivery, MessageBus};

type Queue = mpsc::UnboundedSender<QueuedMessage>;

struct QueuedMessage {
    payload: Bytes,
    attempt: u32,
}

#[derive(Default)]
struct SubjectState {
    /// Non-grouped consumers: every one receives every publish.
    fanout: Vec<Queue>,
    /// Queue-group name -> member queues, round-robined on publish.
    groups: HashMap<String, GroupState>,
}

#[derive(Default)]
struct GroupState {
    members: Vec<Queue>,
    next: usize,
}

/// An in-memory message bus. Cheap to construct; clone to share.
#[derive(Clone, Default)]
pub struct MemoryBus {
    subjects: Arc<Mutex<HashMap<String, SubjectState>>>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageBus for MemoryBus {
    async fn publish(&self, subject: &str, payload: Bytes) -> Result<(), BusError> {
        let mut subjects = self.subjects.lock();
        let Some(state) = subjects.get_mut(subject) else {
            return Ok(());
        };
        state.fanout.retain(|q| q.send(QueuedMessage { payload: payload.clone(), attempt: 1 }).is_ok());
        for group in state.groups.values_mut() {
            if group.members.is_empty() {
                continue;
            }
            // Round-robin, skipping members whose receiver has dropped.
            let len = group.members.len();
            for offset in 0..len {
                let idx = (group.next + offset) % len;
                if group.members[idx]
                    .send(QueuedMessage { payload: payload.clone(), attempt: 1 })
                    .is_ok()
                {
                    group.next = (idx + 1) % len;
                    break;
                }
            }
        }
        Ok(())
    }

    async fn consumer(&self, config: ConsumerConfig) -> Result<Box<dyn Consumer>, BusError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut subjects = self.subjects.lock();
        let state = subjects.entry(config.filter_subject.clone()).or_default();
        match &config.queue_group {
            Some(group) => state.groups.entry(group.clone()).or_default().members.push(tx.clone()),
            None => state.fanout.push(tx.clone()),
        }
        Ok(Box::new(MemoryConsumer { subject: config.filter_subject, rx, requeue: tx }))
    }
}

struct MemoryConsumer {
    subject: String,
    rx: mpsc::UnboundedReceiver<QueuedMessage>,
    requeue: Queue,
}

#[async_trait]
impl Consumer for MemoryConsumer {
    async fn next(&mut self) -> Result<Delivery, BusError> {
        let msg = self.rx.recv().await.ok_or(BusError::StreamClosed)?;
        let acker = Box::new(MemoryAcker {
            requeue: self.requeue.clone(),
            payload: msg.payload.clone(),
            deliveries: Arc::new(AtomicU32::new(msg.attempt)),
        });
        Ok(Delivery::new(self.subject.clone(), msg.payload, msg.attempt, acker))
    }
}

struct MemoryAcker {
    requeue: Queue,
    payload: Bytes,
    deliveries: Arc<AtomicU32>,
}

#[async_trait]
impl Acker for MemoryAcker {
    async fn ack(&self) -> Result<(), BusError> {
        Ok(())
    }

    async fn nack(&self, delay: Duration) -> Result<(), BusError> {
        let requeue = self.requeue.clone();
        let payload = self.payload.clone();
        let next_attempt = self.deliveries.load(Ordering::SeqCst) + 1;
        tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let _ = requeue.send(QueuedMessage { payload, attempt: next_attempt });
        });
        Ok(())
    }

    async fn term(&self) -> Result<(), BusError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
