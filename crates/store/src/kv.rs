// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The raw KV port underlying [`crate::job_store::JobStore`]: byte-level
//! put/get/delete/list/watch over a single flat namespace. `JobStore` is the
//! only code in this crate that knows about job/status/response/worker key
//! shapes; this trait just moves bytes.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::StoreError;

/// One entry observed by [`KvStore::watch`]: either a fresh put or a delete.
#[derive(Debug, Clone)]
pub enum KvEvent {
    Put { key: String, value: Bytes },
    Delete { key: String },
}

/// A flat key-value store with prefix listing and prefix watching.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Write `key`, returning the new revision number (a strictly
    /// increasing per-key counter on a real KV bucket; `create_job`
    /// surfaces it as the `revision` field of its result).
    async fn put(&self, key: &str, value: Bytes) -> Result<u64, StoreError>;

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError>;

    /// Remove the entry. A delete of an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// All keys currently present under `prefix`, in no particular order.
    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Subscribe to every put/delete under `prefix` from this point forward.
    /// Used by `publish_and_wait`/`publish_and_collect` to observe new
    /// response keys without polling.
    async fn watch(&self, prefix: &str) -> Result<tokio::sync::mpsc::Receiver<KvEvent>, StoreError>;
}
