// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-target wait and broadcast idle-timeout collection over the
//! `responses.<id>.` bucket prefix (spec §4.4, §9).

use std::collections::BTreeMap;

use bytes::Bytes;
use oj_core::{Operation, Response, Target};
use oj_store::KvEvent;
use tracing::warn;

use crate::client::DispatchClient;
use crate::error::DispatchError;

fn parse_response(job_id: &str, key: &str, value: &Bytes) -> Option<Response> {
    match serde_json::from_slice::<Response>(value) {
        Ok(response) => Some(response),
        Err(err) => {
            warn!(%job_id, %key, %err, "skipping unparseable response");
            None
        }
    }
}

impl<C: oj_core::Clock> DispatchClient<C> {
    /// Store the request as a normal job, subscribe to new keys under
    /// `responses.<id>.` *before* publishing so no response can arrive
    /// unobserved, publish, then return the first response seen or
    /// [`DispatchError::Timeout`] if `wait_timeout` elapses first.
    pub async fn publish_and_wait(
        &self,
        operation: Operation,
        target: Target,
    ) -> Result<(oj_core::JobId, Response), DispatchError> {
        let (job, subject, _revision) = self.store_job(operation, target).await?;
        let mut watcher = self.store.watch_responses(&job.id).await?;
        self.bus.publish(&subject, Bytes::from(job.id.to_string())).await?;

        let deadline = tokio::time::sleep(self.wait_timeout);
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                _ = &mut deadline => return Err(DispatchError::Timeout),
                event = watcher.recv() => {
                    match event {
                        Some(KvEvent::Put { key, value }) => {
                            if let Some(response) = parse_response(job.id.as_str(), &key, &value) {
                                return Ok((job.id, response));
                            }
                        }
                        Some(KvEvent::Delete { .. }) => {}
                        None => return Err(DispatchError::Timeout),
                    }
                }
            }
        }
    }

    /// Same preamble as [`Self::publish_and_wait`], but drains the response
    /// stream until an idle window (no new response) elapses, returning
    /// every response observed keyed by hostname (latest per host wins).
    /// Zero responses observed before the first idle window elapses yields
    /// [`DispatchError::NoResponders`].
    pub async fn publish_and_collect(
        &self,
        operation: Operation,
        target: Target,
    ) -> Result<(oj_core::JobId, BTreeMap<String, Response>), DispatchError> {
        let (job, subject, _revision) = self.store_job(operation, target).await?;
        let mut watcher = self.store.watch_responses(&job.id).await?;
        self.bus.publish(&subject, Bytes::from(job.id.to_string())).await?;

        let mut responses: BTreeMap<String, Response> = BTreeMap::new();
        loop {
            let idle = tokio::time::sleep(self.idle_timeout);
            tokio::pin!(idle);
            tokio::select! {
                _ = &mut idle => break,
                event = watcher.recv() => {
                    match event {
                        Some(KvEvent::Put { key, value }) => {
                            if let Some(response) = parse_response(job.id.as_str(), &key, &value) {
                                responses.insert(response.hostname.clone(), response);
                            }
                        }
                        Some(KvEvent::Delete { .. }) => {}
                        None => break,
                    }
                }
            }
        }

        if responses.is_empty() {
            return Err(DispatchError::NoResponders);
        }
        Ok((job.id, responses))
    }
}

#[cfg(test)]
#[path = "wait_tests.rs"]
mod tests;
