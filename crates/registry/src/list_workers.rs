// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `list_workers`: scan the registry bucket, tolerating an empty bucket and
//! individual parse failures.

use oj_core::{Clock, WorkerRegistration};
use oj_store::JobStore;
use tracing::warn;

/// List every currently-registered worker. An empty bucket yields an empty
/// list, not an error; entries that fail to parse are skipped individually.
pub async fn list_workers<C: Clock>(store: &JobStore<C>) -> Result<Vec<WorkerRegistration>, oj_store::StoreError> {
    let raw = store.list_workers_raw().await?;
    let mut workers = Vec::with_capacity(raw.len());
    for bytes in raw {
        match serde_json::from_slice::<WorkerRegistration>(&bytes) {
            Ok(registration) => workers.push(registration),
            Err(err) => warn!(%err, "skipping unparseable worker registration"),
        }
    }
    Ok(workers)
}

#[cfg(test)]
#[path = "list_workers_tests.rs"]
mod tests;
