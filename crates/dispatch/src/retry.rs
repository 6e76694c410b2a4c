// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `retry_job`/`delete_job`: the two remaining dispatch-client mutations
//! over the job store (spec §4.4).

use oj_core::{EventKind, JobId, Target, API_HOSTNAME};
use serde_json::json;
use tracing::warn;

use crate::client::DispatchClient;
use crate::error::DispatchError;
use crate::model::CreateJobResult;

impl<C: oj_core::Clock> DispatchClient<C> {
    /// Read the original job, submit its operation again under `target`,
    /// and append a `retried` event on the **original** id carrying
    /// `{new_job_id, target_hostname}`. The append is best-effort: a
    /// failure there is logged, not returned, since the new job has
    /// already been created and dispatched independently.
    pub async fn retry_job(&self, id: &JobId, target: Target) -> Result<CreateJobResult, DispatchError> {
        let original =
            self.store.get_job(id).await?.ok_or_else(|| DispatchError::JobNotFound(id.to_string()))?;

        let created = self.create_job(original.operation, target.clone()).await?;

        let data = json!({ "new_job_id": created.id.to_string(), "target_hostname": target.to_string() });
        if let Err(err) = self.store.append_status(id, EventKind::Retried, API_HOSTNAME, Some(data)).await {
            warn!(job_id = %id, new_job_id = %created.id, %err, "failed to write retried event");
        }

        Ok(created)
    }

    /// Verify the job exists, then delete only `jobs.<id>`; status events
    /// and responses are left for history (spec §3).
    pub async fn delete_job(&self, id: &JobId) -> Result<(), DispatchError> {
        if self.store.get_job(id).await?.is_none() {
            return Err(DispatchError::JobNotFound(id.to_string()));
        }
        self.store.delete_job(id).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
