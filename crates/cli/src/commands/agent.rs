// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj agent run` — build this node's consumer set, attach it to the bus,
//! and start the registry heartbeat (spec §4.5, §4.6), running until
//! interrupted.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use oj_agent::providers::HostnameProvider;
use oj_agent::{AgentCore, AgentIdentity, ProviderRegistry};
use oj_bus::MessageBus;
use oj_core::SystemClock;
use oj_store::JobStore;
use tracing::info;

#[derive(Args)]
pub struct AgentRunArgs {
    /// Override the hostname this agent registers and is addressed by.
    #[arg(long)]
    pub hostname: Option<String>,
    /// Label bindings this agent carries, as repeated "key=value" pairs.
    #[arg(long = "label", value_parser = parse_label)]
    pub labels: Vec<(String, String)>,
    /// Queue-group name for the shared `_any` consumer.
    #[arg(long)]
    pub queue_group: Option<String>,
}

fn parse_label(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw.split_once('=').ok_or_else(|| format!("label {raw:?} must be \"key=value\""))?;
    if key.is_empty() || value.is_empty() {
        return Err(format!("label {raw:?} has an empty key or value"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn local_hostname() -> Result<String> {
    match hostname::get() {
        Ok(name) => Ok(name.to_string_lossy().into_owned()),
        Err(err) => bail!("failed to resolve local hostname: {err}"),
    }
}

/// Run this agent until Ctrl-C, then shut down cleanly (consumers stop,
/// registry entry deregisters via a fresh un-cancelled context per spec §5).
pub async fn run(
    args: AgentRunArgs,
    bus: Arc<dyn MessageBus>,
    store: JobStore<SystemClock>,
    clock: SystemClock,
) -> Result<()> {
    let hostname = match args.hostname {
        Some(h) => h,
        None => local_hostname()?,
    };
    let labels: BTreeMap<String, String> = args.labels.into_iter().collect();
    let identity = AgentIdentity::new(hostname.clone(), labels);

    let mut registry = ProviderRegistry::new();
    registry.register("node.hostname.get", Arc::new(HostnameProvider::new(hostname.clone())));

    let mut core = AgentCore::new(bus, store, clock, registry, identity);
    if let Some(group) = args.queue_group {
        core = core.with_queue_group(group);
    }

    info!(%hostname, "starting agent");
    let running = core.run().await?;

    tokio::signal::ctrl_c().await?;
    info!(%hostname, "shutting down agent");
    running.shutdown().await;
    Ok(())
}
