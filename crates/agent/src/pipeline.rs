// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-message handling (spec §4.5): parse the delivery, load the job,
//! walk it through `acknowledged` → `started` → provider dispatch →
//! `completed`/`failed`, and decide ack/nack/term.
//!
//! Two failure families are both labeled "hard error" in spec §4.5 but
//! resolved differently here, matching spec §7's taxonomy:
//!
//! - **Structural** (malformed subject, unreadable payload, missing job
//!   record): there is no job to write status against, so the delivery is
//!   nack'd and left to the substrate's redelivery/back-off/DLQ policy.
//! - **Semantic validation** (the job record exists but `operation.type`
//!   doesn't parse as `<category>.<entity>.<verb>`): the job is walked
//!   through `started` → `failed` with a descriptive error and the
//!   delivery is acked, since redelivery cannot fix a malformed, immutable
//!   job record.
//! - **Terminal provider failure**: `failed` + response are written, then
//!   the delivery is nack'd regardless, so the substrate's back-off runs
//!   until `max_deliver` is exhausted and the message reaches the DLQ.

use std::sync::Arc;

use oj_bus::Delivery;
use oj_core::{Clock, EventKind, JobId, Response};
use oj_store::JobStore;
use tracing::warn;

use crate::config::{AgentIdentity, ConsumerTuning};
use crate::provider::ProviderRegistry;

/// What to do with a delivery once processing has settled.
enum Outcome {
    Ack,
    Nack,
    Term,
}

/// Per-agent message pipeline: owns the pieces every delivery needs
/// (store, provider table, this agent's identity, redelivery tuning).
pub struct Pipeline<C: Clock> {
    store: JobStore<C>,
    clock: C,
    registry: Arc<ProviderRegistry>,
    identity: AgentIdentity,
    tuning: ConsumerTuning,
}

impl<C: Clock> Pipeline<C> {
    pub fn new(
        store: JobStore<C>,
        clock: C,
        registry: Arc<ProviderRegistry>,
        identity: AgentIdentity,
        tuning: ConsumerTuning,
    ) -> Self {
        Self { store, clock, registry, identity, tuning }
    }

    /// Handle one delivery end to end, terminating it with ack/nack/term.
    pub async fn handle(&self, delivery: Delivery) {
        let outcome = self.process(&delivery).await;
        let result = match outcome {
            Outcome::Ack => delivery.ack().await,
            Outcome::Term => delivery.term().await,
            Outcome::Nack => {
                let delay = self.tuning.back_off_for(delivery_attempt_or(&delivery, 1));
                delivery.nack(delay).await
            }
        };
        if let Err(err) = result {
            warn!(%err, "failed to settle delivery with the substrate");
        }
    }

    async fn process(&self, delivery: &Delivery) -> Outcome {
        if parse_namespace(&delivery.subject).is_none() {
            warn!(subject = %delivery.subject, "malformed subject, letting the substrate redeliver");
            return Outcome::Nack;
        }

        let Ok(job_id_str) = std::str::from_utf8(&delivery.payload) else {
            warn!(subject = %delivery.subject, "delivery payload is not valid UTF-8");
            return Outcome::Nack;
        };
        let job_id = JobId::from_string(job_id_str);

        let job = match self.store.get_job(&job_id).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                warn!(%job_id, "job record missing, letting the substrate redeliver");
                return Outcome::Nack;
            }
            Err(err) => {
                warn!(%job_id, %err, "transient error loading job record");
                return Outcome::Nack;
            }
        };

        if !is_well_formed_op_type(&job.operation.op_type) {
            self.write_status(&job_id, EventKind::Started, None).await;
            self.write_status(
                &job_id,
                EventKind::Failed,
                Some(serde_json::json!({ "error": format!("malformed operation type {:?}", job.operation.op_type) })),
            )
            .await;
            self.write_response(&job_id, Response::failed(&self.identity.hostname, self.now(), "malformed operation type"))
                .await;
            return Outcome::Ack;
        }

        self.write_status(&job_id, EventKind::Acknowledged, None).await;
        self.write_status(&job_id, EventKind::Started, None).await;

        let Some(provider) = self.registry.get(&job.operation.op_type) else {
            warn!(op_type = %job.operation.op_type, "no provider registered for operation type");
            self.fail(&job_id, "no provider registered for this operation type").await;
            return Outcome::Nack;
        };

        match provider.call(job.operation.data.clone()).await {
            Ok(output) => {
                self.write_status(&job_id, EventKind::Completed, None).await;
                let response = oj_core::Response {
                    status: oj_core::ResponseStatus::Completed,
                    data: Some(output.data),
                    error: None,
                    changed: output.changed,
                    hostname: self.identity.hostname.clone(),
                    timestamp: self.now(),
                };
                if let Err(err) = self.store.append_response(&job_id, &response).await {
                    warn!(%job_id, %err, "response write failed, surfacing as fatal for this delivery");
                    return Outcome::Nack;
                }
                Outcome::Ack
            }
            Err(provider_err) => {
                self.fail(&job_id, &provider_err.0).await;
                Outcome::Nack
            }
        }
    }

    async fn fail(&self, job_id: &JobId, error: &str) {
        self.write_status(job_id, EventKind::Failed, Some(serde_json::json!({ "error": error }))).await;
        self.write_response(job_id, Response::failed(&self.identity.hostname, self.now(), error)).await;
    }

    async fn write_status(&self, job_id: &JobId, event: EventKind, data: Option<serde_json::Value>) {
        if let Err(err) = self.store.append_status(job_id, event, &self.identity.hostname, data).await {
            warn!(%job_id, %event, %err, "status write failed, continuing anyway");
        }
    }

    async fn write_response(&self, job_id: &JobId, response: Response) {
        if let Err(err) = self.store.append_response(job_id, &response).await {
            warn!(%job_id, %err, "response write failed");
        }
    }

    fn now(&self) -> String {
        self.clock.event_stamp().to_rfc3339()
    }
}

/// `jobs.<query|modify>.*` → the namespace tag, or `None` for anything else.
fn parse_namespace(subject: &str) -> Option<&'static str> {
    if subject.starts_with("jobs.query.") || subject == "jobs.query" {
        Some("query")
    } else if subject.starts_with("jobs.modify.") || subject == "jobs.modify" {
        Some("modify")
    } else {
        None
    }
}

/// `<category>.<entity>.<verb>`: at least three non-empty dot-separated
/// components.
fn is_well_formed_op_type(op_type: &str) -> bool {
    let parts: Vec<&str> = op_type.split('.').collect();
    parts.len() >= 3 && parts.iter().all(|p| !p.is_empty())
}

fn delivery_attempt_or(delivery: &Delivery, default: u32) -> u32 {
    if delivery.delivery_attempt == 0 {
        default
    } else {
        delivery.delivery_attempt
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
