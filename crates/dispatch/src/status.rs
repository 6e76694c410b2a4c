// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `get_job_status`: load a job plus its event/response set and fold them
//! through the pure reducer.

use oj_core::JobId;
use oj_reducer::ReducedStatus;

use crate::client::DispatchClient;
use crate::error::DispatchError;
use crate::model::JobStatus;

impl<C: oj_core::Clock> DispatchClient<C> {
    /// Fold a job's current event/response set into its reconstructed
    /// status, without the job record itself. Shared by
    /// [`Self::get_job_status`] and `list_jobs`'s per-job status lookups.
    pub(crate) async fn reduced_status(&self, id: &JobId) -> Result<ReducedStatus, DispatchError> {
        let events = self.store.list_status(id).await?;
        let responses = self.store.list_responses(id).await?;
        Ok(oj_reducer::reduce(&events, &responses))
    }

    /// `get_job` + the event/response set under its prefixes, reduced to a
    /// current status (spec §4.4).
    pub async fn get_job_status(&self, id: &JobId) -> Result<JobStatus, DispatchError> {
        let job = self.store.get_job(id).await?.ok_or_else(|| DispatchError::JobNotFound(id.to_string()))?;
        let reduced = self.reduced_status(id).await?;
        Ok(JobStatus { job, reduced })
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
