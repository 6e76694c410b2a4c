// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors surfaced by [`crate::DispatchClient`]'s operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Store(#[from] oj_store::StoreError),

    #[error(transparent)]
    Bus(#[from] oj_bus::BusError),

    #[error(transparent)]
    InvalidTarget(#[from] oj_core::TargetParseError),

    #[error("job {0:?} not found")]
    JobNotFound(String),

    /// Single-target `publish_and_wait` exceeded its deadline with no
    /// response observed (spec §7, user-visible).
    #[error("timed out waiting for a response")]
    Timeout,

    /// Broadcast `publish_and_collect`'s first idle window elapsed with no
    /// response observed at all (spec §7, user-visible).
    #[error("no agent responded before the idle timeout")]
    NoResponders,
}
