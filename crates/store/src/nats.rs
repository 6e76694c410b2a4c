// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! NATS JetStream KV adapter for [`KvStore`].

use async_nats::jetstream::kv::Config as KvConfig;
use async_nats::jetstream::{self, Context as JetStreamContext};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::info;

use crate::error::StoreError;
use crate::kv::{KvEvent, KvStore};

/// NATS JetStream KV store backing the `jobs`/`status`/`responses`/`workers`
/// key namespace.
#[derive(Clone)]
pub struct NatsKv {
    store: async_nats::jetstream::kv::Store,
}

impl NatsKv {
    pub async fn connect(url: &str, bucket: &str, ttl: std::time::Duration) -> Result<Self, StoreError> {
        info!(%url, %bucket, "connecting to NATS JetStream KV");
        let client = async_nats::connect(url).await.map_err(|e| StoreError::Connect(e.to_string()))?;
        let jetstream: JetStreamContext = jetstream::new(client);

        let store = match jetstream.get_key_value(bucket).await {
            Ok(store) => store,
            Err(_) => jetstream
                .create_key_value(KvConfig { bucket: bucket.to_string(), max_age: ttl, ..Default::default() })
                .await
                .map_err(|e| StoreError::Connect(e.to_string()))?,
        };
        Ok(Self { store })
    }
}

#[async_trait]
impl KvStore for NatsKv {
    async fn put(&self, key: &str, value: Bytes) -> Result<u64, StoreError> {
        self.store
            .put(key, value)
            .await
            .map_err(|e| StoreError::Put { key: key.to_string(), source: e.to_string() })
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        self.store
            .get(key)
            .await
            .map_err(|e| StoreError::Get { key: key.to_string(), source: e.to_string() })
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.store
            .delete(key)
            .await
            .map_err(|e| StoreError::Delete { key: key.to_string(), source: e.to_string() })
    }

    async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut keys = self
            .store
            .keys()
            .await
            .map_err(|e| StoreError::List { prefix: prefix.to_string(), source: e.to_string() })?;
        let mut matched = Vec::new();
        while let Some(key) = keys.next().await {
            let key = key.map_err(|e| StoreError::List { prefix: prefix.to_string(), source: e.to_string() })?;
            if key.starts_with(prefix) {
                matched.push(key);
            }
        }
        Ok(matched)
    }

    async fn watch(&self, prefix: &str) -> Result<mpsc::Receiver<KvEvent>, StoreError> {
        let mut watcher = self
            .store
            .watch(&format!("{prefix}>"))
            .await
            .map_err(|e| StoreError::Watch { prefix: prefix.to_string(), source: e.to_string() })?;
        let (tx, rx) = mpsc::channel(256);
        tokio::spawn(async move {
            while let Some(Ok(entry)) = watcher.next().await {
                let event = match entry.operation {
                    async_nats::jetstream::kv::Operation::Put => {
                        KvEvent::Put { key: entry.key, value: entry.value }
                    }
                    _ => KvEvent::Delete { key: entry.key },
                };
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });
        Ok(rx)
    }
}
