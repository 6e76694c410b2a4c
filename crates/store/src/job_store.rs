// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `JobStore`: the job/status/response key-shape discipline layered over the
//! raw [`KvStore`] byte port.
//!
//! This is the only place in the crate that knows the key grammar from
//! `oj_core::keys` and serializes/deserializes the job-domain payload
//! shapes. Every status/response write reads the clock exactly once and
//! derives both the key suffix and the payload timestamp from that single
//! read, per [`oj_core::Clock::event_stamp`]'s contract.

use std::sync::Arc;

use bytes::Bytes;
use oj_core::{
    job_key, response_key, response_prefix, status_key, status_prefix, worker_key, Clock,
    EventKind, Job, JobId, Response, StatusEvent,
};
use tracing::warn;

use crate::error::StoreError;
use crate::kv::{KvEvent, KvStore};

/// The job/status/response/worker KV facade. Generic over the clock so
/// tests can inject a [`oj_core::FakeClock`]; the underlying byte store is a
/// trait object since [`KvStore`] has no `Clone`/generic-method bound to
/// fight with dynamic dispatch.
///
/// `workers_kv` defaults to the same bucket as `kv` (fine for the in-memory
/// fake and for tests); production wiring should point it at a separate
/// bucket with the registry's own (shorter) TTL via
/// [`Self::with_workers_kv`], since a single bucket can only carry one TTL
/// and the jobs/status/responses bucket and the registry bucket have
/// different liveness semantics (spec §6).
pub struct JobStore<C: Clock> {
    kv: Arc<dyn KvStore>,
    workers_kv: Arc<dyn KvStore>,
    clock: C,
}

impl<C: Clock> Clone for JobStore<C> {
    fn clone(&self) -> Self {
        Self { kv: self.kv.clone(), workers_kv: self.workers_kv.clone(), clock: self.clock.clone() }
    }
}

impl<C: Clock> JobStore<C> {
    pub fn new(kv: Arc<dyn KvStore>, clock: C) -> Self {
        Self { workers_kv: kv.clone(), kv, clock }
    }

    /// Back `workers.*` reads/writes with a separate bucket, e.g. one
    /// carrying the registry's own TTL instead of the main jobs bucket's.
    pub fn with_workers_kv(mut self, workers_kv: Arc<dyn KvStore>) -> Self {
        self.workers_kv = workers_kv;
        self
    }

    /// Writes `jobs.<id>`, returning the bucket revision the write landed at
    /// (surfaced by the dispatch client as `create_job`'s `revision` field).
    pub async fn put_job(&self, job: &Job) -> Result<u64, StoreError> {
        let key = job_key(&job.id);
        let bytes = serde_json::to_vec(job).map_err(|e| StoreError::Corrupt { key: key.clone(), source: e })?;
        self.kv.put(&key, Bytes::from(bytes)).await
    }

    pub async fn get_job(&self, id: &JobId) -> Result<Option<Job>, StoreError> {
        let key = job_key(id);
        let Some(bytes) = self.kv.get(&key).await? else {
            return Ok(None);
        };
        let job = serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt { key, source: e })?;
        Ok(Some(job))
    }

    /// Removes only `jobs.<id>`; status events and responses are left for
    /// history, per spec §3's deletion contract.
    pub async fn delete_job(&self, id: &JobId) -> Result<(), StoreError> {
        self.kv.delete(&job_key(id)).await
    }

    pub async fn append_status(
        &self,
        job_id: &JobId,
        event: EventKind,
        hostname: &str,
        data: Option<serde_json::Value>,
    ) -> Result<StatusEvent, StoreError> {
        let stamp = self.clock.event_stamp();
        let payload = StatusEvent {
            job_id: job_id.clone(),
            event,
            hostname: hostname.to_string(),
            timestamp: stamp.to_rfc3339(),
            unix_nano: stamp.unix_nano,
            data,
        };
        let key = status_key(job_id, event, hostname, stamp);
        let bytes = serde_json::to_vec(&payload).map_err(|e| StoreError::Corrupt { key: key.clone(), source: e })?;
        self.kv.put(&key, Bytes::from(bytes)).await?;
        Ok(payload)
    }

    pub async fn append_response(&self, job_id: &JobId, response: &Response) -> Result<(), StoreError> {
        let stamp = self.clock.event_stamp();
        let key = response_key(job_id, &response.hostname, stamp);
        let bytes = serde_json::to_vec(response).map_err(|e| StoreError::Corrupt { key: key.clone(), source: e })?;
        self.kv.put(&key, Bytes::from(bytes)).await?;
        Ok(())
    }

    /// All status events for a job, tolerating unparseable entries (logged
    /// and skipped, never fatal — spec §7).
    pub async fn list_status(&self, job_id: &JobId) -> Result<Vec<StatusEvent>, StoreError> {
        let keys = self.kv.keys_with_prefix(&status_prefix(job_id)).await?;
        let mut events = Vec::with_capacity(keys.len());
        for key in keys {
            match self.kv.get(&key).await? {
                Some(bytes) => match serde_json::from_slice::<StatusEvent>(&bytes) {
                    Ok(event) => events.push(event),
                    Err(err) => warn!(%key, %err, "skipping unparseable status event"),
                },
                None => continue,
            }
        }
        Ok(events)
    }

    /// All responses for a job, tolerating unparseable entries.
    pub async fn list_responses(&self, job_id: &JobId) -> Result<Vec<Response>, StoreError> {
        let keys = self.kv.keys_with_prefix(&response_prefix(job_id)).await?;
        let mut responses = Vec::with_capacity(keys.len());
        for key in keys {
            match self.kv.get(&key).await? {
                Some(bytes) => match serde_json::from_slice::<Response>(&bytes) {
                    Ok(response) => responses.push(response),
                    Err(err) => warn!(%key, %err, "skipping unparseable response"),
                },
                None => continue,
            }
        }
        Ok(responses)
    }

    /// Every job id under `jobs.*`, unsorted.
    pub async fn list_job_ids(&self) -> Result<Vec<String>, StoreError> {
        let keys = self.kv.keys_with_prefix("jobs.").await?;
        Ok(keys.into_iter().filter_map(|k| k.strip_prefix("jobs.").map(str::to_string)).collect())
    }

    /// Watch for new response keys under `responses.<id>.`, used by
    /// `publish_and_wait`/`publish_and_collect`.
    pub async fn watch_responses(&self, job_id: &JobId) -> Result<tokio::sync::mpsc::Receiver<KvEvent>, StoreError> {
        self.kv.watch(&response_prefix(job_id)).await
    }

    pub async fn put_worker(&self, key_suffix_host: &str, payload: Bytes) -> Result<(), StoreError> {
        self.workers_kv.put(&worker_key(key_suffix_host), payload).await?;
        Ok(())
    }

    pub async fn delete_worker(&self, host: &str) -> Result<(), StoreError> {
        self.workers_kv.delete(&worker_key(host)).await
    }

    pub async fn list_workers_raw(&self) -> Result<Vec<Bytes>, StoreError> {
        let keys = self.workers_kv.keys_with_prefix("workers.").await?;
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(bytes) = self.workers_kv.get(&key).await? {
                values.push(bytes);
            }
        }
        Ok(values)
    }
}

#[cfg(test)]
#[path = "job_store_tests.rs"]
mod tests;
