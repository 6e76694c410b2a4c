// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`AgentCore`]: wires the consumer set, the message pipeline and the
//! registry heartbeat into a running agent, and tears all of it down
//! cleanly on shutdown.

use std::sync::Arc;

use oj_bus::MessageBus;
use oj_core::Clock;
use oj_registry::HeartbeatHandle;
use oj_store::JobStore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::{AgentIdentity, ConsumerTuning};
use crate::consumer_set::build_consumer_set;
use crate::error::AgentError;
use crate::pipeline::Pipeline;
use crate::provider::ProviderRegistry;

/// Everything needed to start an agent: the substrate handles, this node's
/// identity, and the tunables that shape every durable consumer.
pub struct AgentCore<C: Clock> {
    bus: Arc<dyn MessageBus>,
    store: JobStore<C>,
    clock: C,
    registry: Arc<ProviderRegistry>,
    identity: AgentIdentity,
    queue_group: String,
    tuning: ConsumerTuning,
    heartbeat_interval: std::time::Duration,
}

impl<C: Clock + 'static> AgentCore<C> {
    pub fn new(
        bus: Arc<dyn MessageBus>,
        store: JobStore<C>,
        clock: C,
        registry: ProviderRegistry,
        identity: AgentIdentity,
    ) -> Self {
        Self {
            bus,
            store,
            clock,
            registry: Arc::new(registry),
            identity,
            queue_group: oj_core::config::queue_group(),
            tuning: ConsumerTuning::from_env(),
            heartbeat_interval: oj_core::config::heartbeat_interval(),
        }
    }

    pub fn with_queue_group(mut self, group: impl Into<String>) -> Self {
        self.queue_group = group.into();
        self
    }

    pub fn with_tuning(mut self, tuning: ConsumerTuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_heartbeat_interval(mut self, interval: std::time::Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Attach every consumer, spawn one pull loop per consumer, and start
    /// the heartbeat. Returns a handle that shuts everything down cleanly.
    pub async fn run(self) -> Result<RunningAgent, AgentError> {
        let pipeline = Arc::new(Pipeline::new(
            self.store.clone(),
            self.clock.clone(),
            self.registry.clone(),
            self.identity.clone(),
            self.tuning.clone(),
        ));

        let specs = build_consumer_set(&self.identity, &self.queue_group, &self.tuning);
        let token = CancellationToken::new();
        let mut tasks = Vec::with_capacity(specs.len());

        for spec in specs {
            let durable_name = spec.config.durable_name.clone();
            let mut consumer = self.bus.consumer(spec.config).await?;
            let pipeline = pipeline.clone();
            let loop_token = token.clone();
            info!(consumer = %durable_name, "attached consumer");
            tasks.push(tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = loop_token.cancelled() => break,
                        delivery = consumer.next() => {
                            match delivery {
                                Ok(delivery) => pipeline.handle(delivery).await,
                                Err(err) => {
                                    warn!(consumer = %durable_name, %err, "consumer pull failed, retrying");
                                }
                            }
                        }
                    }
                }
            }));
        }

        let heartbeat = oj_registry::spawn(
            self.store.clone(),
            self.clock.clone(),
            self.identity.hostname.clone(),
            self.identity.labels.clone(),
            self.heartbeat_interval,
        );

        Ok(RunningAgent { token, tasks, heartbeat })
    }
}

/// A running agent: cancel its consumer loops and deregister from the
/// worker registry via [`RunningAgent::shutdown`].
pub struct RunningAgent {
    token: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
    heartbeat: HeartbeatHandle,
}

impl RunningAgent {
    pub async fn shutdown(self) {
        self.token.cancel();
        for task in self.tasks {
            let _ = task.await;
        }
        self.heartbeat.shutdown().await;
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
