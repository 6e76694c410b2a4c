// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `list_jobs`: scan, reverse to newest-first, filter and paginate (spec
//! §4.4, §8's boundary behaviors).

use oj_core::{Job, JobId};
use oj_reducer::AggregateStatus;
use tracing::warn;

use crate::client::DispatchClient;
use crate::error::DispatchError;
use crate::model::{JobListResult, JobSummary};

/// `limit == 0` means "no limit"; `offset >= len` yields an empty page
/// without erroring.
fn paginate<T>(mut items: Vec<T>, limit: usize, offset: usize) -> Vec<T> {
    if offset >= items.len() {
        return Vec::new();
    }
    let rest = items.split_off(offset);
    if limit == 0 {
        rest
    } else {
        rest.into_iter().take(limit).collect()
    }
}

impl<C: oj_core::Clock> DispatchClient<C> {
    async fn all_jobs_newest_first(&self) -> Result<Vec<Job>, DispatchError> {
        let ids = self.store.list_job_ids().await?;
        let mut jobs = Vec::with_capacity(ids.len());
        for id in ids {
            let job_id = JobId::from_string(id);
            match self.store.get_job(&job_id).await {
                Ok(Some(job)) => jobs.push(job),
                Ok(None) => {}
                Err(err) => warn!(job_id = %job_id, %err, "skipping unreadable job during list"),
            }
        }
        jobs.sort_by(|a, b| b.created.unix_nano.cmp(&a.created.unix_nano));
        Ok(jobs)
    }

    /// Scan all jobs (prefix `jobs.`), newest first, optionally filtered by
    /// aggregate status, then paginate.
    ///
    /// Without a filter, status is computed lazily only for the page being
    /// returned and `total` is the unfiltered count. With a filter, every
    /// job's status must be computed to decide membership before
    /// pagination, and `total` is the filtered count.
    pub async fn list_jobs(
        &self,
        status_filter: Option<AggregateStatus>,
        limit: usize,
        offset: usize,
    ) -> Result<JobListResult, DispatchError> {
        let jobs = self.all_jobs_newest_first().await?;

        match status_filter {
            None => {
                let total = jobs.len();
                let page = paginate(jobs, limit, offset);
                let mut summaries = Vec::with_capacity(page.len());
                for job in page {
                    match self.reduced_status(&job.id).await {
                        Ok(reduced) => summaries.push(JobSummary { job, status: reduced.status }),
                        Err(err) => warn!(job_id = %job.id, %err, "skipping job whose status failed to compute"),
                    }
                }
                Ok(JobListResult { jobs: summaries, total })
            }
            Some(filter) => {
                let mut matching = Vec::new();
                for job in jobs {
                    match self.reduced_status(&job.id).await {
                        Ok(reduced) if reduced.status == filter => {
                            matching.push(JobSummary { job, status: reduced.status })
                        }
                        Ok(_) => {}
                        Err(err) => warn!(job_id = %job.id, %err, "skipping job whose status failed to compute"),
                    }
                }
                let total = matching.len();
                let page = paginate(matching, limit, offset);
                Ok(JobListResult { jobs: page, total })
            }
        }
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
