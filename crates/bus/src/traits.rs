// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The message-bus port: publish, and build durable consumers over it.

use async_trait::async_trait;
use bytes::Bytes;

use crate::config::ConsumerConfig;
use crate::error::BusError;

/// A message bus capable of publishing and building durable consumers.
///
/// Implementations: [`crate::nats::NatsMessageBus`] (feature `nats`) for
/// production, [`crate::memory::MemoryBus`] for tests.
#[async_trait]
pub trait MessageBus: Send + Sync {
    async fn publish(&self, subject: &str, payload: Bytes) -> Result<(), BusError>;

    /// Build (or reattach to) a durable consumer per `config`.
    async fn consumer(&self, config: ConsumerConfig) -> Result<Box<dyn Consumer>, BusError>;
}

/// A durable consumer over one filter subject.
#[async_trait]
pub trait Consumer: Send {
    /// Pull the next delivery, suspending until one arrives.
    async fn next(&mut self) -> Result<Delivery, BusError>;
}

/// One delivered message, carrying enough to ack, nack, or term it.
pub struct Delivery {
    pub subject: String,
    pub payload: Bytes,
    /// 1-indexed count of delivery attempts for this message (1 on first
    /// delivery), used to compute back-off on nack.
    pub delivery_attempt: u32,
    acker: Box<dyn Acker>,
}

impl Delivery {
    pub fn new(
        subject: impl Into<String>,
        payload: Bytes,
        delivery_attempt: u32,
        acker: Box<dyn Acker>,
    ) -> Self {
        Self { subject: subject.into(), payload, delivery_attempt, acker }
    }

    pub async fn ack(self) -> Result<(), BusError> {
        self.acker.ack().await
    }

    /// Negative-acknowledge with an explicit redelivery delay (back-off).
    pub async fn nack(self, delay: std::time::Duration) -> Result<(), BusError> {
        self.acker.nack(delay).await
    }

    /// Terminate: tell the substrate never to redeliver this message (used
    /// for structurally malformed deliveries per spec §7 validation rules,
    /// where redelivery cannot fix the problem — acked, not nacked).
    pub async fn term(self) -> Result<(), BusError> {
        self.acker.term().await
    }
}

#[async_trait]
pub trait Acker: Send + Sync {
    async fn ack(&self) -> Result<(), BusError>;
    async fn nack(&self, delay: std::time::Duration) -> Result<(), BusError>;
    async fn term(&self) -> Result<(), BusError>;
}
