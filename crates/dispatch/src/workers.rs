// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `list_workers`: thin delegate to [`oj_registry::list_workers`] over this
//! client's store.

use oj_core::WorkerRegistration;

use crate::client::DispatchClient;
use crate::error::DispatchError;

impl<C: oj_core::Clock> DispatchClient<C> {
    pub async fn list_workers(&self) -> Result<Vec<WorkerRegistration>, DispatchError> {
        Ok(oj_registry::list_workers(&self.store).await?)
    }
}
