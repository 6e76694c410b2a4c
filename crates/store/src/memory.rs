// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! An in-process [`KvStore`] fake for tests, backed by a sorted map and a
//! broadcast channel that feeds prefix watchers.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};

use crate::error::StoreError;
use crate::kv::{KvEvent, KvStore};

const CHANNEL_CAPACITY: usize = 1024;

/// An in-memory KV store. Cheap to construct; clone to share.
#[derive(Clone)]
pub struct MemoryKv {
    entries: Arc<Mutex<BTreeMap<String, Bytes>>>,
    events: broadcast::Sender<KvEvent>,
    revision: Arc<AtomicU64>,
}

impl MemoryKv {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            entries: Arc::new(Mutex::new(BTreeMap::new())),
            events,
            revision: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Default for MemoryKv {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn put(&self, key: &str, value: Bytes) -> Result<u64, StoreError> {
        self.entries.lock().insert(key.to_string(), value.clone());
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        let _ = self.events.send(KvEvent::Put { key: key.to_string(), value });
        Ok(revision)
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(key);
        let _ = self.events.send(KvEvent::Delete { key: key.to_string() });
        Ok(())
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.lock().range(prefix.to_string()..).take_while(|(k, _)| k.starts_with(prefix)).map(|(k, _)| k.clone()).collect())
    }

    async fn watch(&self, prefix: &str) -> Result<mpsc::Receiver<KvEvent>, StoreError> {
        let mut source = self.events.subscribe();
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let prefix = prefix.to_string();
        tokio::spawn(async move {
            loop {
                match source.recv().await {
                    Ok(event) => {
                        let matches = match &event {
                            KvEvent::Put { key, .. } | KvEvent::Delete { key } => key.starts_with(&prefix),
                        };
                        if matches && tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        Ok(rx)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
