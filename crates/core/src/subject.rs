// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subject router: maps a namespace + [`Target`](crate::target::Target) to a
//! concrete wire subject, and expands a label target into the hierarchy of
//! subjects an agent with that label must subscribe to.

use crate::sanitize::{sanitize, sanitized_segments};
use crate::target::Target;

/// The two wire namespaces a submission may route under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Query,
    Modify,
}

impl Namespace {
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Query => "jobs.query",
            Namespace::Modify => "jobs.modify",
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Build the concrete publish subject for a namespace + target.
///
/// Bit-exact with spec §6's subject grammar.
pub fn route(namespace: Namespace, target: &Target) -> String {
    let prefix = namespace.prefix();
    match target {
        Target::Any => format!("{prefix}._any"),
        Target::All => format!("{prefix}._all"),
        Target::Host(h) => format!("{prefix}.host.{}", sanitize(h)),
        Target::Label { key, value } => {
            format!("{prefix}.label.{key}.{}", sanitized_segments(value).join("."))
        }
    }
}

/// Expand a label binding `(key, value)` into the hierarchy of subjects an
/// agent carrying that label must subscribe to under the given namespace:
/// one subject per prefix depth of the dotted value.
///
/// `group=web.dev.us-east` yields `<prefix>.label.group.web`,
/// `<prefix>.label.group.web.dev`, `<prefix>.label.group.web.dev.us-east`.
pub fn label_prefix_subjects(namespace: Namespace, key: &str, value: &str) -> Vec<String> {
    let prefix = namespace.prefix();
    let segments = sanitized_segments(value);
    (1..=segments.len())
        .map(|depth| format!("{prefix}.label.{key}.{}", segments[..depth].join(".")))
        .collect()
}

#[cfg(test)]
#[path = "subject_tests.rs"]
mod tests;
