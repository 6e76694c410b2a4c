// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj`: the CLI front end over the job dispatch fabric — submit/list/
//! inspect/retry/delete jobs and list workers from the API side (spec
//! §4.4), or run an agent (spec §4.5, §4.6).

mod color;
mod commands;
mod exit_error;
mod output;

use std::sync::Arc;

use clap::Parser;
use exit_error::ExitError;
use oj_bus::{MessageBus, NatsMessageBus};
use oj_core::SystemClock;
use oj_dispatch::DispatchClient;
use oj_store::{JobStore, NatsKv};

use commands::agent::AgentRunArgs;
use commands::job::JobCommand;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "oj", about = "Job dispatch fabric client and agent", styles = color::styles())]
struct Cli {
    #[arg(long, value_enum, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Submit, inspect, list, retry, and delete jobs.
    #[command(subcommand)]
    Job(JobCommand),
    /// List currently-live agents.
    Workers,
    /// Run this node as an agent: attach its consumer set and heartbeat.
    Agent(AgentRunArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(err) = run().await {
        if let Some(exit_error) = err.downcast_ref::<ExitError>() {
            eprintln!("{exit_error}");
            std::process::exit(exit_error.code);
        }
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let clock = SystemClock::default();
    let bus: Arc<dyn MessageBus> = Arc::new(NatsMessageBus::connect(&oj_core::config::nats_url()).await?);
    let jobs_kv = Arc::new(
        NatsKv::connect(
            &oj_core::config::nats_url(),
            &oj_core::config::jobs_bucket_name(),
            oj_core::config::jobs_bucket_ttl().unwrap_or_default(),
        )
        .await?,
    );
    let workers_kv = Arc::new(
        NatsKv::connect(
            &oj_core::config::nats_url(),
            &oj_core::config::registry_bucket_name(),
            oj_core::config::registry_ttl(),
        )
        .await?,
    );
    let store = JobStore::new(jobs_kv, clock.clone()).with_workers_kv(workers_kv);
    let client = DispatchClient::new(bus.clone(), store.clone(), clock.clone());

    match cli.command {
        Command::Job(job_command) => commands::job::handle(job_command, &client, cli.format).await?,
        Command::Workers => commands::worker::list(&client, cli.format).await?,
        Command::Agent(args) => commands::agent::run(args, bus, store, clock).await?,
    }

    Ok(())
}
