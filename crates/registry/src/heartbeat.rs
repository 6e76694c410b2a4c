// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent heartbeat loop: rewrites `workers.<identity>` on a fixed interval
//! and deregisters on clean shutdown.

use std::collections::BTreeMap;
use std::time::Duration;

use oj_core::{Clock, WorkerRegistration};
use oj_store::JobStore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// A running heartbeat loop. Drop without calling [`shutdown`](Self::shutdown)
/// aborts the loop without deregistering — callers that want a clean
/// deregister must call `shutdown`.
pub struct HeartbeatHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl HeartbeatHandle {
    /// Stop the loop and deregister. Uses a fresh call outside the
    /// cancellation path so the delete always runs to completion even
    /// though the loop itself is being torn down.
    pub async fn shutdown(self) {
        self.token.cancel();
        let _ = self.task.await;
    }
}

/// Start the heartbeat loop for one agent identity.
///
/// Writes an initial registration immediately, then rewrites it every
/// `interval` until [`HeartbeatHandle::shutdown`] is called, at which point
/// it deletes `workers.<hostname>`.
pub fn spawn<C: Clock + 'static>(
    store: JobStore<C>,
    clock: C,
    hostname: String,
    labels: BTreeMap<String, String>,
    interval: Duration,
) -> HeartbeatHandle {
    let token = CancellationToken::new();
    let loop_token = token.clone();

    let task = tokio::spawn(async move {
        loop {
            if let Err(err) = write_registration(&store, &clock, &hostname, &labels).await {
                error!(%hostname, %err, "heartbeat write failed");
            }
            tokio::select! {
                _ = loop_token.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }
        if let Err(err) = store.delete_worker(&hostname).await {
            error!(%hostname, %err, "heartbeat deregistration failed");
        } else {
            info!(%hostname, "deregistered from worker registry");
        }
    });

    HeartbeatHandle { token, task }
}

async fn write_registration<C: Clock>(
    store: &JobStore<C>,
    clock: &C,
    hostname: &str,
    labels: &BTreeMap<String, String>,
) -> Result<(), oj_store::StoreError> {
    let registration = WorkerRegistration::new(hostname, labels.clone(), clock.event_stamp().to_rfc3339());
    let bytes = serde_json::to_vec(&registration).unwrap_or_default();
    store.put_worker(hostname, bytes.into()).await
}

#[cfg(test)]
#[path = "heartbeat_tests.rs"]
mod tests;
