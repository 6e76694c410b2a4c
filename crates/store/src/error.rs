// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to connect to KV store: {0}")]
    Connect(String),

    #[error("failed to write key {key:?}: {source}")]
    Put { key: String, source: String },

    #[error("failed to read key {key:?}: {source}")]
    Get { key: String, source: String },

    #[error("failed to delete key {key:?}: {source}")]
    Delete { key: String, source: String },

    #[error("failed to list keys under {prefix:?}: {source}")]
    List { prefix: String, source: String },

    #[error("failed to watch prefix {prefix:?}: {source}")]
    Watch { prefix: String, source: String },

    #[error("job {0:?} not found")]
    JobNotFound(String),

    #[error("stored value for {key:?} is not valid JSON: {source}")]
    Corrupt { key: String, source: serde_json::Error },
}
