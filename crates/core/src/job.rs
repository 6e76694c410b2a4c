// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The job record: an immutable submission, keyed by [`JobId`].

use serde::{Deserialize, Serialize};

use crate::clock::EventStamp;
use crate::operation::{classify, Operation};
use crate::subject::Namespace;
use crate::target::Target;

crate::define_id! {
    pub struct JobId("job_");
}

/// An immutable job submission, as stored under `jobs.<id>`.
///
/// Nothing about a `Job` changes after creation; outcome accrues separately
/// as [`crate::event::StatusEvent`]s and [`crate::response::Response`]s
/// keyed off its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub target: Target,
    pub operation: Operation,
    pub created: EventStamp,
}

impl Job {
    pub fn new(target: Target, operation: Operation, created: EventStamp) -> Self {
        Self { id: JobId::new(), target, operation, created }
    }

    /// The namespace this job's operation routes under.
    pub fn namespace(&self) -> Namespace {
        classify(&self.operation)
    }
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
