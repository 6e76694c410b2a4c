// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`DispatchClient`]: the API-side facade over the bus + store, generic
//! over the clock so tests can inject [`oj_core::FakeClock`].

use std::sync::Arc;
use std::time::Duration;

use oj_bus::MessageBus;
use oj_core::Clock;
use oj_store::JobStore;

/// Serves the API side of the fabric: submit jobs, wait for or collect
/// responses, and expose list/get/retry/delete over the job store.
pub struct DispatchClient<C: Clock> {
    pub(crate) bus: Arc<dyn MessageBus>,
    pub(crate) store: JobStore<C>,
    pub(crate) clock: C,
    pub(crate) wait_timeout: Duration,
    pub(crate) idle_timeout: Duration,
}

impl<C: Clock> Clone for DispatchClient<C> {
    fn clone(&self) -> Self {
        Self {
            bus: self.bus.clone(),
            store: self.store.clone(),
            clock: self.clock.clone(),
            wait_timeout: self.wait_timeout,
            idle_timeout: self.idle_timeout,
        }
    }
}

impl<C: Clock> DispatchClient<C> {
    /// Builds a client with timeouts from [`oj_core::config`].
    pub fn new(bus: Arc<dyn MessageBus>, store: JobStore<C>, clock: C) -> Self {
        Self {
            bus,
            store,
            clock,
            wait_timeout: oj_core::config::wait_timeout(),
            idle_timeout: oj_core::config::idle_timeout(),
        }
    }

    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }

    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn store(&self) -> &JobStore<C> {
        &self.store
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
