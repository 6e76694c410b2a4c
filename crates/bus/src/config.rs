// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Consumer configuration surface (spec §6): every durable consumer carries
//! a durable name, a filter subject, explicit-ack + deliver-all policy, a
//! redelivery cap, an ack-wait, a max-in-flight bound and an explicit
//! back-off schedule.

use std::time::Duration;

/// How a consumer replays messages already on the stream at attach time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayPolicy {
    Instant,
    Original,
}

/// Configuration for one durable consumer.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Stable name; consumers with the same name reattach to the same
    /// durable state across agent restarts.
    pub durable_name: String,
    /// Exact subject this consumer filters on.
    pub filter_subject: String,
    /// Shared queue group name, or `None` for a personal (fan-out) consumer.
    pub queue_group: Option<String>,
    /// Max concurrent unacked deliveries to this consumer.
    pub max_ack_pending: u32,
    /// Redelivery cap before the substrate routes to the DLQ.
    pub max_deliver: u32,
    /// How long the substrate waits for an ack before redelivering.
    pub ack_wait: Duration,
    /// Redelivery back-off schedule: `back_off[attempt - 1]` for
    /// `attempt <= back_off.len()`, otherwise the last entry.
    pub back_off: Vec<Duration>,
    pub replay_policy: ReplayPolicy,
}

impl ConsumerConfig {
    pub fn new(durable_name: impl Into<String>, filter_subject: impl Into<String>) -> Self {
        Self {
            durable_name: durable_name.into(),
            filter_subject: filter_subject.into(),
            queue_group: None,
            max_ack_pending: 64,
            max_deliver: 5,
            ack_wait: Duration::from_secs(30),
            back_off: vec![
                Duration::from_secs(1),
                Duration::from_secs(5),
                Duration::from_secs(30),
            ],
            replay_policy: ReplayPolicy::Instant,
        }
    }

    pub fn with_queue_group(mut self, group: impl Into<String>) -> Self {
        self.queue_group = Some(group.into());
        self
    }

    pub fn with_max_ack_pending(mut self, n: u32) -> Self {
        self.max_ack_pending = n;
        self
    }

    /// The back-off delay for a given 1-indexed redelivery attempt,
    /// saturating on the last configured entry.
    pub fn back_off_for(&self, attempt: u32) -> Duration {
        if self.back_off.is_empty() {
            return Duration::ZERO;
        }
        let idx = (attempt.saturating_sub(1) as usize).min(self.back_off.len() - 1);
        self.back_off[idx]
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
