// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `create_job`: route → persist → publish. Shared by every submission path
//! (`create_job` itself, `publish_and_wait`, `publish_and_collect`,
//! `retry_job`) via [`DispatchClient::store_job`].

use bytes::Bytes;
use oj_core::{classify, route, EventKind, Job, Operation, Target, API_HOSTNAME};
use tracing::warn;

use crate::client::DispatchClient;
use crate::error::DispatchError;
use crate::model::CreateJobResult;

impl<C: oj_core::Clock> DispatchClient<C> {
    /// Route, generate an id, and persist a job record plus its `submitted`
    /// event, without publishing. Used directly by `retry_job`/broadcast
    /// paths that need the job persisted before they subscribe to its
    /// response prefix, so publish can't race the watch setup.
    pub(crate) async fn store_job(
        &self,
        operation: Operation,
        target: Target,
    ) -> Result<(Job, String, u64), DispatchError> {
        let namespace = classify(&operation);
        let subject = route(namespace, &target);
        let job = Job::new(target, operation, self.clock.event_stamp());
        let revision = self.store.put_job(&job).await?;

        if let Err(err) = self.store.append_status(&job.id, EventKind::Submitted, API_HOSTNAME, None).await {
            warn!(job_id = %job.id, %err, "failed to write submitted event (job already persisted)");
        }

        Ok((job, subject, revision))
    }

    /// Route → generate id → persist `jobs.<id>` → write `submitted` event
    /// (best-effort) → publish the id on the routed subject.
    ///
    /// A publish failure surfaces to the caller; the job record already
    /// exists regardless, so callers may retry delivery separately (e.g.
    /// via `retry_job`).
    pub async fn create_job(&self, operation: Operation, target: Target) -> Result<CreateJobResult, DispatchError> {
        let (job, subject, revision) = self.store_job(operation, target).await?;
        self.bus.publish(&subject, Bytes::from(job.id.to_string())).await?;
        Ok(CreateJobResult { id: job.id, subject, revision })
    }
}

#[cfg(test)]
#[path = "create_tests.rs"]
mod tests;
