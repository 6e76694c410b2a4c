// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `oj job` — submit, inspect, list, retry, and delete jobs against the
//! [`oj_dispatch::DispatchClient`] (spec §4.4).

use anyhow::{bail, Result};
use clap::Subcommand;
use oj_core::{Clock, JobId, Operation, OperationKind, Target};
use oj_dispatch::DispatchClient;
use oj_reducer::AggregateStatus;

use crate::color;
use crate::output::{format_or_json, handle_list, OutputFormat};

#[derive(Subcommand)]
pub enum JobCommand {
    /// Submit an operation and return immediately with the new job id.
    Submit {
        /// Target: "_any", "_all", a hostname, or "label:<key>=<value>".
        target: Target,
        /// Operation type, e.g. "node.hostname.get".
        #[arg(long = "type")]
        op_type: String,
        /// Opaque operation payload as a JSON object (default `{}`).
        #[arg(long)]
        data: Option<String>,
        /// Explicit routing namespace, overriding the suffix/prefix
        /// heuristic ("query" or "modify").
        #[arg(long)]
        kind: Option<String>,
    },
    /// Submit a single-target operation and block for its first response.
    Wait {
        target: Target,
        #[arg(long = "type")]
        op_type: String,
        #[arg(long)]
        data: Option<String>,
        #[arg(long)]
        kind: Option<String>,
    },
    /// Submit a broadcast operation and collect responses until the idle
    /// timeout elapses.
    Collect {
        target: Target,
        #[arg(long = "type")]
        op_type: String,
        #[arg(long)]
        data: Option<String>,
        #[arg(long)]
        kind: Option<String>,
    },
    /// Show a job's record and reconstructed status.
    Status {
        /// Job id, e.g. "job_abc123".
        id: String,
    },
    /// List jobs, newest first.
    List {
        /// Filter by aggregate status (submitted/processing/completed/failed/partial_failure).
        #[arg(long)]
        status: Option<String>,
        /// Maximum number of jobs to show; 0 means no limit.
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
        /// Number of jobs to skip before applying the limit.
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Re-submit a job's operation against a (possibly different) target.
    Retry {
        id: String,
        /// Target for the new submission (default "_any").
        #[arg(long, default_value = "_any")]
        target: Target,
    },
    /// Delete a job's record. Status events and responses are left for history.
    Delete { id: String },
}

fn parse_data(data: Option<String>) -> Result<serde_json::Value> {
    match data {
        None => Ok(serde_json::json!({})),
        Some(raw) => Ok(serde_json::from_str(&raw)?),
    }
}

fn parse_kind(kind: Option<String>) -> Result<Option<OperationKind>> {
    match kind.as_deref() {
        None => Ok(None),
        Some("query") => Ok(Some(OperationKind::Query)),
        Some("modify") => Ok(Some(OperationKind::Modify)),
        Some(other) => bail!("invalid --kind {other:?}: expected \"query\" or \"modify\""),
    }
}

fn build_operation(op_type: String, data: Option<String>, kind: Option<String>) -> Result<Operation> {
    let mut operation = Operation::new(op_type, parse_data(data)?);
    if let Some(kind) = parse_kind(kind)? {
        operation = operation.with_kind(kind);
    }
    Ok(operation)
}

fn parse_status_filter(status: Option<String>) -> Result<Option<AggregateStatus>> {
    match status.as_deref() {
        None => Ok(None),
        Some("submitted") => Ok(Some(AggregateStatus::Submitted)),
        Some("processing") => Ok(Some(AggregateStatus::Processing)),
        Some("completed") => Ok(Some(AggregateStatus::Completed)),
        Some("failed") => Ok(Some(AggregateStatus::Failed)),
        Some("partial_failure") => Ok(Some(AggregateStatus::PartialFailure)),
        Some(other) => bail!(
            "invalid --status {other:?}: expected submitted, processing, completed, failed, or partial_failure"
        ),
    }
}

pub async fn handle<C: Clock>(
    command: JobCommand,
    client: &DispatchClient<C>,
    format: OutputFormat,
) -> Result<()> {
    match command {
        JobCommand::Submit { target, op_type, data, kind } => {
            let operation = build_operation(op_type, data, kind)?;
            let result = client.create_job(operation, target).await?;
            format_or_json(format, &result, || {
                println!("Submitted job {} ({})", color::header(result.id.as_str()), result.subject);
            })?;
        }
        JobCommand::Wait { target, op_type, data, kind } => {
            let operation = build_operation(op_type, data, kind)?;
            let (id, response) = client.publish_and_wait(operation, target).await?;
            format_or_json(format, &serde_json::json!({ "id": id, "response": response }), || {
                println!(
                    "Job {} {} on {}",
                    color::header(id.as_str()),
                    response.status,
                    response.hostname
                );
                if let Some(data) = &response.data {
                    println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
                }
                if let Some(error) = &response.error {
                    println!("error: {}", error);
                }
            })?;
        }
        JobCommand::Collect { target, op_type, data, kind } => {
            let operation = build_operation(op_type, data, kind)?;
            let (id, responses) = client.publish_and_collect(operation, target).await?;
            format_or_json(format, &serde_json::json!({ "id": id, "responses": responses }), || {
                println!("Job {} — {} response(s)", color::header(id.as_str()), responses.len());
                for (host, response) in &responses {
                    println!("  {}: {}", host, response.status);
                }
            })?;
        }
        JobCommand::Status { id } => {
            let job_id = JobId::from_string(&id);
            let status = client.get_job_status(&job_id).await?;
            format_or_json(format, &status, || {
                println!("Job {} — {}", color::header(job_id.as_str()), status.reduced.status);
                if let Some(error) = &status.reduced.error {
                    println!("error: {}", error);
                }
                for entry in &status.reduced.timeline {
                    println!("  {} {}", entry.timestamp.to_rfc3339(), entry.message);
                }
            })?;
        }
        JobCommand::List { status, limit, offset } => {
            let filter = parse_status_filter(status)?;
            let result = client.list_jobs(filter, limit, offset).await?;
            handle_list(format, &result.jobs, "No jobs found", |items| {
                for summary in items {
                    println!(
                        "{}  {}  {}",
                        color::header(summary.job.id.as_str()),
                        summary.status,
                        summary.job.operation.op_type
                    );
                }
                println!("\n{} of {} total", items.len(), result.total);
            })?;
        }
        JobCommand::Retry { id, target } => {
            let job_id = JobId::from_string(&id);
            let result = client.retry_job(&job_id, target).await?;
            format_or_json(format, &result, || {
                println!("Retried {} as {}", color::header(job_id.as_str()), color::header(result.id.as_str()));
            })?;
        }
        JobCommand::Delete { id } => {
            let job_id = JobId::from_string(&id);
            client.delete_job(&job_id).await?;
            println!("Deleted job {}", color::header(&id));
        }
    }
    Ok(())
}
