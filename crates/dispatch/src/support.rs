// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test scaffolding: an in-memory bus + store wired to a
//! [`FakeClock`], used by every test module in this crate.

#![cfg(test)]

use std::sync::Arc;
use std::time::Duration;

use oj_bus::MemoryBus;
use oj_core::FakeClock;
use oj_store::{JobStore, MemoryKv};

use crate::client::DispatchClient;

pub(crate) fn new_client() -> DispatchClient<FakeClock> {
    let kv = Arc::new(MemoryKv::new());
    let clock = FakeClock::new();
    let store = JobStore::new(kv, clock.clone());
    DispatchClient::new(Arc::new(MemoryBus::new()), store, clock)
        .with_wait_timeout(Duration::from_millis(200))
        .with_idle_timeout(Duration::from_millis(100))
}
