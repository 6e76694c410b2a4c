// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The operation a job executes: an opaque `{type, data}` pair the dispatch
//! core never interprets, routed to the query or modify namespace.

use serde::{Deserialize, Serialize};

use crate::subject::Namespace;

/// Explicit query/modify classification, set by the caller.
///
/// spec §9 (Open Questions) treats the suffix/prefix heuristic as fragile
/// and recommends an explicit field with the heuristic kept only as a
/// compatibility fallback; this is that field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Query,
    Modify,
}

/// A single operation: `{type: "<category>.<entity>.<verb>", data: <opaque>}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operation {
    /// Dotted type string, e.g. `"node.hostname.get"`.
    #[serde(rename = "type")]
    pub op_type: String,
    /// Opaque payload; the dispatch core never interprets this, only
    /// providers do.
    #[serde(default)]
    pub data: serde_json::Value,
    /// Explicit classification. When absent, [`classify`] falls back to the
    /// suffix/prefix heuristic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<OperationKind>,
}

impl Operation {
    pub fn new(op_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self { op_type: op_type.into(), data, kind: None }
    }

    pub fn with_kind(mut self, kind: OperationKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// The `<category>` component of `op_type`, if present.
    pub fn category(&self) -> Option<&str> {
        self.op_type.split('.').next().filter(|s| !s.is_empty())
    }
}

const QUERY_SUFFIXES: &[&str] = &[".get", ".query", ".read", ".status", ".do"];

/// Classify an operation into its routing namespace.
///
/// Uses `operation.kind` when present; otherwise falls back to the
/// compatibility heuristic from spec §9: any `op_type` ending in one of
/// `.get|.query|.read|.status|.do`, or starting with `node.`, routes to
/// the query namespace; everything else routes to modify.
pub fn classify(op: &Operation) -> Namespace {
    if let Some(kind) = op.kind {
        return match kind {
            OperationKind::Query => Namespace::Query,
            OperationKind::Modify => Namespace::Modify,
        };
    }
    let is_query = QUERY_SUFFIXES.iter().any(|suffix| op.op_type.ends_with(suffix))
        || op.op_type.starts_with("node.");
    if is_query {
        Namespace::Query
    } else {
        Namespace::Modify
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
