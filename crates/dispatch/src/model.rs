// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result shapes returned by [`crate::DispatchClient`]'s operations.

use oj_core::{Job, JobId};
use oj_reducer::{AggregateStatus, ReducedStatus};
use serde::Serialize;

/// Result of [`crate::DispatchClient::create_job`].
#[derive(Debug, Clone, Serialize)]
pub struct CreateJobResult {
    pub id: JobId,
    pub subject: String,
    /// KV bucket revision the `jobs.<id>` write landed at.
    pub revision: u64,
}

/// A job's record plus its current reconstructed status, as returned by
/// [`crate::DispatchClient::get_job_status`].
#[derive(Debug, Clone, Serialize)]
pub struct JobStatus {
    pub job: Job,
    #[serde(flatten)]
    pub reduced: ReducedStatus,
}

/// One row of [`crate::DispatchClient::list_jobs`]'s result.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub job: Job,
    pub status: AggregateStatus,
}

/// Result of [`crate::DispatchClient::list_jobs`].
#[derive(Debug, Clone, Serialize)]
pub struct JobListResult {
    pub jobs: Vec<JobSummary>,
    /// Total matching jobs (post-filter, pre-pagination).
    pub total: usize,
}
