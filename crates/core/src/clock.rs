// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling.
//!
//! [`Clock::event_stamp`] is the single place that reads wall-clock time for
//! an event: it captures one instant and derives both the key suffix
//! (`unix_nano`, with a per-process disambiguating sequence number) and the
//! RFC3339 payload timestamp from that single read, so the two never drift
//! apart under redelivery or clock skew.

use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// A single clock read, carrying everything a status/response event key and
/// payload need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventStamp {
    /// Nanoseconds since the Unix epoch.
    pub unix_nano: i64,
    /// Per-process disambiguator, non-zero only when two reads in the same
    /// process landed on the same nanosecond.
    pub seq: u32,
}

impl EventStamp {
    /// RFC3339 timestamp with nanosecond precision, derived from this stamp.
    pub fn to_rfc3339(self) -> String {
        DateTime::<Utc>::from_timestamp(
            self.unix_nano / 1_000_000_000,
            (self.unix_nano % 1_000_000_000) as u32,
        )
        .unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).unwrap())
        .to_rfc3339_opts(chrono::SecondsFormat::Nanos, true)
    }

    /// The key-suffix segment(s): `<unix-nano>` or `<unix-nano>.<seq>` when
    /// `seq` is non-zero.
    pub fn key_suffix(self) -> String {
        if self.seq == 0 {
            self.unix_nano.to_string()
        } else {
            format!("{}.{}", self.unix_nano, self.seq)
        }
    }
}

/// A clock that provides the current time. Implementations must be
/// monotonic within a single process between any two consecutive calls to
/// [`Clock::event_stamp`] from that process (spec requirement: cross-process
/// ordering is only approximate and the reducer tolerates skew).
pub trait Clock: Clone + Send + Sync {
    /// Capture one wall-clock read for a new event.
    fn event_stamp(&self) -> EventStamp;

    /// Milliseconds since the Unix epoch, for non-event timestamps
    /// (registry heartbeats, idle timers).
    fn epoch_ms(&self) -> u64;
}

/// Real system clock. Guards against same-nanosecond collisions with an
/// in-process sequence counter that resets whenever the nanosecond value
/// advances.
#[derive(Clone, Default)]
pub struct SystemClock {
    last_nano: Arc<AtomicI64>,
    seq: Arc<AtomicU32>,
}

impl Clock for SystemClock {
    fn event_stamp(&self) -> EventStamp {
        let nano = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as i64;

        let prev = self.last_nano.swap(nano, Ordering::SeqCst);
        let seq = if prev == nano {
            self.seq.fetch_add(1, Ordering::SeqCst) + 1
        } else {
            self.seq.store(0, Ordering::SeqCst);
            0
        };

        EventStamp { unix_nano: nano, seq }
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Fake clock for tests with controllable, strictly increasing time.
#[derive(Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeClockState>>,
}

struct FakeClockState {
    unix_nano: i64,
    seq: u32,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeClockState { unix_nano: 1_000_000_000_000, seq: 0 })),
        }
    }

    /// Advance the clock by the given number of nanoseconds.
    pub fn advance_nanos(&self, nanos: i64) {
        let mut state = self.inner.lock();
        state.unix_nano += nanos;
        state.seq = 0;
    }

    /// Set the clock to a specific unix-nano value.
    pub fn set_unix_nano(&self, unix_nano: i64) {
        let mut state = self.inner.lock();
        state.unix_nano = unix_nano;
        state.seq = 0;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn event_stamp(&self) -> EventStamp {
        let mut state = self.inner.lock();
        let seq = state.seq;
        state.seq += 1;
        EventStamp { unix_nano: state.unix_nano, seq }
    }

    fn epoch_ms(&self) -> u64 {
        (self.inner.lock().unix_nano / 1_000_000) as u64
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
