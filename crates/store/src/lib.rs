// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! KV store port: the `jobs`/`status`/`responses`/`workers` key namespace,
//! over a raw [`KvStore`] byte port.
//!
//! [`memory::MemoryKv`] backs tests; the `nats` feature adds
//! [`nats::NatsKv`] for production over JetStream KV.

pub mod error;
pub mod job_store;
pub mod kv;
pub mod memory;
#[cfg(feature = "nats")]
pub mod nats;

pub use error::StoreError;
pub use job_store::JobStore;
pub use kv::{KvEvent, KvStore};
pub use memory::MemoryKv;
#[cfg(feature = "nats")]
pub use nats::NatsKv;
