// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! NATS JetStream adapter for [`MessageBus`].
//!
//! A `_any`-style queue-group consumer is modeled as several agents pulling
//! concurrently from the *same* durable consumer (JetStream's native
//! competing-consumers behavior), so `config.queue_group` — when set —
//! becomes the durable name itself rather than `config.durable_name`. A
//! personal (`_all`/host/label) consumer uses `config.durable_name` as-is,
//! unique per agent identity.

use async_nats::jetstream::consumer::pull::Config as PullConfig;
use async_nats::jetstream::consumer::{AckPolicy, DeliverPolicy, ReplayPolicy as NatsReplayPolicy};
use async_nats::jetstream::stream::Config as StreamConfig;
use async_nats::jetstream::{self, Context as JetStreamContext};
use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info, instrument};

use crate::config::{ConsumerConfig, ReplayPolicy};
use crate::error::BusError;
use crate::traits::{Acker, Consumer, Delivery, MessageBus};

/// Stream name holding every job notification subject.
pub const STREAM_NAME: &str = "OJ_JOBS";

// Exhausted deliveries land on JetStream's per-consumer advisory subject;
// wiring a sourcing consumer into `oj_core::config::dlq_stream_name()` is a
// deployment concern, not this adapter's.

/// NATS JetStream message bus: one stream (`OJ_JOBS`) carrying both the
/// query and modify subject hierarchies, with one durable pull consumer per
/// filter subject.
#[derive(Clone)]
pub struct NatsMessageBus {
    jetstream: JetStreamContext,
}

impl NatsMessageBus {
    pub async fn connect(url: &str) -> Result<Self, BusError> {
        info!(%url, "connecting to NATS");
        let client = async_nats::connect(url)
            .await
            .map_err(|e| BusError::Connect(e.to_string()))?;
        let jetstream = jetstream::new(client);
        let bus = Self { jetstream };
        bus.ensure_stream().await?;
        Ok(bus)
    }

    async fn ensure_stream(&self) -> Result<(), BusError> {
        let config = StreamConfig {
            name: STREAM_NAME.to_string(),
            subjects: vec!["jobs.query.>".to_string(), "jobs.modify.>".to_string()],
            ..Default::default()
        };
        match self.jetstream.get_stream(STREAM_NAME).await {
            Ok(_) => {
                debug!(stream = STREAM_NAME, "stream already exists");
                Ok(())
            }
            Err(_) => {
                self.jetstream
                    .create_stream(config)
                    .await
                    .map_err(|e| BusError::Connect(e.to_string()))?;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl MessageBus for NatsMessageBus {
    #[instrument(skip(self, payload), fields(subject = %subject))]
    async fn publish(&self, subject: &str, payload: Bytes) -> Result<(), BusError> {
        let ack = self
            .jetstream
            .publish(subject.to_string(), payload)
            .await
            .map_err(|e| BusError::Publish { subject: subject.to_string(), source: e.to_string() })?;
        ack.await.map_err(|e| BusError::Publish { subject: subject.to_string(), source: e.to_string() })?;
        Ok(())
    }

    async fn consumer(&self, config: ConsumerConfig) -> Result<Box<dyn Consumer>, BusError> {
        let durable_name = config.queue_group.clone().unwrap_or_else(|| config.durable_name.clone());

        let stream = self
            .jetstream
            .get_stream(STREAM_NAME)
            .await
            .map_err(|e| BusError::ConsumerSetup { name: durable_name.clone(), source: e.to_string() })?;

        let pull_config = PullConfig {
            durable_name: Some(durable_name.clone()),
            filter_subject: config.filter_subject.clone(),
            ack_policy: AckPolicy::Explicit,
            deliver_policy: DeliverPolicy::All,
            replay_policy: match config.replay_policy {
                ReplayPolicy::Instant => NatsReplayPolicy::Instant,
                ReplayPolicy::Original => NatsReplayPolicy::Original,
            },
            max_deliver: config.max_deliver as i64,
            ack_wait: config.ack_wait,
            max_ack_pending: config.max_ack_pending as i64,
            backoff: config.back_off.clone(),
            ..Default::default()
        };

        let consumer = stream
            .get_or_create_consumer(&durable_name, pull_config)
            .await
            .map_err(|e| BusError::ConsumerSetup { name: durable_name.clone(), source: e.to_string() })?;

        Ok(Box::new(NatsConsumer { consumer, subject: config.filter_subject }))
    }
}

struct NatsConsumer {
    consumer: async_nats::jetstream::consumer::Consumer<PullConfig>,
    subject: String,
}

#[async_trait]
impl Consumer for NatsConsumer {
    async fn next(&mut self) -> Result<Delivery, BusError> {
        let mut messages =
            self.consumer.messages().await.map_err(|e| BusError::Pull(e.to_string()))?;
        let message = futures_util::StreamExt::next(&mut messages)
            .await
            .ok_or(BusError::StreamClosed)?
            .map_err(|e| BusError::Pull(e.to_string()))?;

        let delivery_attempt = message
            .info()
            .map(|info| info.delivered as u32)
            .unwrap_or(1);
        let payload = message.payload.clone();
        let subject = self.subject.clone();
        let (msg, _) = message.split();
        Ok(Delivery::new(subject, payload, delivery_attempt, Box::new(NatsAcker { message: msg })))
    }
}

struct NatsAcker {
    message: async_nats::jetstream::Message,
}

#[async_trait]
impl Acker for NatsAcker {
    async fn ack(&self) -> Result<(), BusError> {
        self.message.ack().await.map_err(|e| BusError::Ack(e.to_string()))
    }

    async fn nack(&self, delay: std::time::Duration) -> Result<(), BusError> {
        self.message
            .ack_with(async_nats::jetstream::AckKind::Nak(delay))
            .await
            .map_err(|e| BusError::Ack(e.to_string()))
    }

    async fn term(&self) -> Result<(), BusError> {
        self.message
            .ack_with(async_nats::jetstream::AckKind::Term)
            .await
            .map_err(|e| BusError::Ack(e.to_string()))
    }
}
