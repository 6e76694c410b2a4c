// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the dispatch fabric.
//!
//! Every tunable lives here as a typed accessor with a sensible default,
//! following the daemon's `env.rs` idiom: one function per setting, parsed
//! from `std::env::var`, never panicking on a bad value.

use std::time::Duration;

/// NATS server URL for both the message bus and the KV store.
pub fn nats_url() -> String {
    std::env::var("OJ_NATS_URL").unwrap_or_else(|_| "nats://127.0.0.1:4222".to_string())
}

/// Shared queue-group name joined by every agent's `_any` consumer.
pub fn queue_group() -> String {
    std::env::var("OJ_QUEUE_GROUP").unwrap_or_else(|_| "oj-agents".to_string())
}

/// Main KV bucket name: jobs + status events + responses.
pub fn jobs_bucket_name() -> String {
    std::env::var("OJ_JOBS_BUCKET").unwrap_or_else(|_| "oj_jobs".to_string())
}

/// Registry bucket name: agent heartbeat records, kept separate from the
/// main jobs bucket so each can carry its own TTL (spec §6).
pub fn registry_bucket_name() -> String {
    std::env::var("OJ_REGISTRY_BUCKET").unwrap_or_else(|_| "oj_workers".to_string())
}

/// Heartbeat tick interval (default 10s, per spec §4.6).
pub fn heartbeat_interval() -> Duration {
    duration_secs_env("OJ_HEARTBEAT_INTERVAL_SECS", 10)
}

/// Registry bucket TTL; absence past this implies an agent is no longer
/// live (default 30s, per spec §4.6).
pub fn registry_ttl() -> Duration {
    duration_secs_env("OJ_REGISTRY_TTL_SECS", 30)
}

/// Main KV bucket TTL (jobs + status + responses). `None` means no
/// expiry — the bucket grows unbounded, left to operator-level compaction.
pub fn jobs_bucket_ttl() -> Option<Duration> {
    std::env::var("OJ_JOBS_TTL_SECS").ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_secs)
}

/// Max concurrent unacked deliveries per consumer (`max_ack_pending`).
pub fn max_jobs() -> u32 {
    std::env::var("OJ_MAX_JOBS").ok().and_then(|s| s.parse().ok()).unwrap_or(64)
}

/// Redelivery cap before the substrate routes a message to the DLQ.
pub fn max_deliver() -> u32 {
    std::env::var("OJ_MAX_DELIVER").ok().and_then(|s| s.parse().ok()).unwrap_or(5)
}

/// How long the substrate waits for an ack before redelivering.
pub fn ack_wait() -> Duration {
    duration_secs_env("OJ_ACK_WAIT_SECS", 30)
}

/// Back-off schedule for redelivery attempts 1..N; saturates on the last
/// entry. Configurable as a comma-separated list of second counts.
pub fn back_off() -> Vec<Duration> {
    match std::env::var("OJ_BACK_OFF_SECS") {
        Ok(raw) => {
            let parsed: Vec<Duration> = raw
                .split(',')
                .filter_map(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .collect();
            if parsed.is_empty() {
                default_back_off()
            } else {
                parsed
            }
        }
        Err(_) => default_back_off(),
    }
}

fn default_back_off() -> Vec<Duration> {
    vec![Duration::from_secs(1), Duration::from_secs(5), Duration::from_secs(30)]
}

/// Name of the advisory stream a substrate-level DLQ consumer should source
/// exhausted deliveries into. This crate only names the stream; routing
/// messages into it once `max_deliver` is exhausted is the bus adapter's
/// responsibility, not the dispatch core's.
pub fn dlq_stream_name() -> String {
    std::env::var("OJ_DLQ_STREAM").unwrap_or_else(|_| "OJ_JOBS_DLQ".to_string())
}

/// Idle timeout for `publish_and_collect`'s broadcast drain: how long to
/// wait after the last response before concluding collection is done.
pub fn idle_timeout() -> Duration {
    duration_secs_env("OJ_IDLE_TIMEOUT_SECS", 3)
}

/// Deadline for `publish_and_wait`'s single-target wait.
pub fn wait_timeout() -> Duration {
    duration_secs_env("OJ_WAIT_TIMEOUT_SECS", 30)
}

fn duration_secs_env(key: &str, default_secs: u64) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(default_secs))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
