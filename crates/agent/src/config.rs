// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent identity and the consumer tuning surface (spec §4.5, §6).

use std::collections::BTreeMap;
use std::time::Duration;

use oj_bus::{ConsumerConfig, ReplayPolicy};
use oj_core::sanitize::sanitize;

/// This agent's hostname and label bindings, plus the sanitized identity
/// stem every personal consumer name and subject derives from.
#[derive(Debug, Clone)]
pub struct AgentIdentity {
    pub hostname: String,
    pub identity: String,
    pub labels: BTreeMap<String, String>,
}

impl AgentIdentity {
    pub fn new(hostname: impl Into<String>, labels: BTreeMap<String, String>) -> Self {
        let hostname = hostname.into();
        let identity = sanitize(&hostname);
        Self { hostname, identity, labels }
    }
}

/// The consumer configuration surface shared by every durable consumer this
/// agent builds (spec §6): `max_deliver`, `ack_wait`, `max_ack_pending`,
/// `back_off`, replay policy.
#[derive(Debug, Clone)]
pub struct ConsumerTuning {
    pub max_ack_pending: u32,
    pub max_deliver: u32,
    pub ack_wait: Duration,
    pub back_off: Vec<Duration>,
    pub replay_policy: ReplayPolicy,
}

impl ConsumerTuning {
    pub fn from_env() -> Self {
        Self {
            max_ack_pending: oj_core::config::max_jobs(),
            max_deliver: oj_core::config::max_deliver(),
            ack_wait: oj_core::config::ack_wait(),
            back_off: oj_core::config::back_off(),
            replay_policy: ReplayPolicy::Instant,
        }
    }

    /// Apply this tuning to a freshly-named [`ConsumerConfig`].
    pub fn apply(&self, mut config: ConsumerConfig) -> ConsumerConfig {
        config.max_ack_pending = self.max_ack_pending;
        config.max_deliver = self.max_deliver;
        config.ack_wait = self.ack_wait;
        config.back_off = self.back_off.clone();
        config.replay_policy = self.replay_policy;
        config
    }

    /// The back-off delay for a 1-indexed redelivery attempt, saturating on
    /// the last configured entry.
    pub fn back_off_for(&self, attempt: u32) -> Duration {
        if self.back_off.is_empty() {
            return Duration::ZERO;
        }
        let idx = (attempt.saturating_sub(1) as usize).min(self.back_off.len() - 1);
        self.back_off[idx]
    }
}

impl Default for ConsumerTuning {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
