// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors surfaced by a [`crate::MessageBus`] or [`crate::Consumer`]
/// implementation.
#[derive(Debug, Error)]
pub enum BusError {
    #[error("failed to connect to message bus: {0}")]
    Connect(String),

    #[error("failed to publish to {subject:?}: {source}")]
    Publish { subject: String, source: String },

    #[error("failed to create consumer {name:?}: {source}")]
    ConsumerSetup { name: String, source: String },

    #[error("failed to pull next delivery: {0}")]
    Pull(String),

    #[error("failed to ack/nack delivery: {0}")]
    Ack(String),

    #[error("consumer stream ended unexpectedly")]
    StreamClosed,
}
