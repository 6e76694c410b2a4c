// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Bus(#[from] oj_bus::BusError),

    #[error(transparent)]
    Store(#[from] oj_store::StoreError),
}
