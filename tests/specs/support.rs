// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared scaffolding: an in-memory bus + store wired to a [`FakeClock`],
//! and a helper to stand up a running agent over that same fabric.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use oj_agent::providers::HostnameProvider;
use oj_agent::{AgentCore, AgentIdentity, Provider, ProviderRegistry, RunningAgent};
use oj_bus::{MemoryBus, MessageBus};
use oj_core::FakeClock;
use oj_dispatch::DispatchClient;
use oj_store::{JobStore, MemoryKv};

/// One fabric shared by a dispatch client and any number of agents.
pub struct Fabric {
    pub bus: Arc<dyn MessageBus>,
    pub store: JobStore<FakeClock>,
    pub clock: FakeClock,
}

pub fn new_fabric() -> Fabric {
    let clock = FakeClock::new();
    let store = JobStore::new(Arc::new(MemoryKv::new()), clock.clone());
    Fabric { bus: Arc::new(MemoryBus::new()), store, clock }
}

impl Fabric {
    pub fn client(&self) -> DispatchClient<FakeClock> {
        DispatchClient::new(self.bus.clone(), self.store.clone(), self.clock.clone())
            .with_wait_timeout(Duration::from_millis(300))
            .with_idle_timeout(Duration::from_millis(150))
    }

    /// Start an agent registering `node.hostname.get` plus whatever
    /// `extra_providers` the caller supplies, carrying `labels`, and return
    /// the running handle. Every agent shares the `test-agents` queue group
    /// so `_any` submissions load-balance across them.
    pub async fn spawn_agent(
        &self,
        hostname: &str,
        labels: BTreeMap<String, String>,
        extra_providers: Vec<(&str, Arc<dyn Provider>)>,
    ) -> RunningAgent {
        let identity = AgentIdentity::new(hostname, labels);
        let mut registry = ProviderRegistry::new();
        registry.register("node.hostname.get", Arc::new(HostnameProvider::new(hostname)));
        for (op_type, provider) in extra_providers {
            registry.register(op_type, provider);
        }

        let core = AgentCore::new(self.bus.clone(), self.store.clone(), self.clock.clone(), registry, identity)
            .with_queue_group("test-agents");
        core.run().await.unwrap()
    }
}
