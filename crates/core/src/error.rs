// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types shared across the dispatch fabric's crates.

use thiserror::Error;

use crate::keys::KeyParseError;
use crate::target::TargetParseError;

/// Errors surfaced by this crate's own parsing and validation logic.
///
/// Downstream crates (`oj-bus`, `oj-store`, ...) define their own error
/// types for substrate failures and wrap this one where a core parse feeds
/// into a substrate call.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid target: {0}")]
    InvalidTarget(#[from] TargetParseError),

    #[error("invalid key: {0}")]
    InvalidKey(#[from] KeyParseError),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
