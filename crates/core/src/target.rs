// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target specifier grammar: what a submission should reach.
//!
//! Serializes to/from the tagged strings in spec §4.1 (`"_any"`, `"_all"`,
//! `"host:<h>"`, a bare hostname, `"label:<key>=<dotted.value>"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a submission should be delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// Single-winner load balance across the shared queue group.
    Any,
    /// Every live agent subscribed to `_all`.
    All,
    /// At most one agent whose identity matches this (unsanitized) hostname.
    Host(String),
    /// Every agent bound to any prefix of `value` under `key`.
    Label { key: String, value: String },
}

/// Error parsing a target specifier string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TargetParseError {
    #[error("label target missing '=' separator: {0:?}")]
    MissingLabelSeparator(String),
    #[error("label target has empty key or value: {0:?}")]
    EmptyLabelComponent(String),
    #[error("unknown reserved target {0:?} (only _any and _all are defined)")]
    UnknownReservedTarget(String),
}

impl Target {
    pub fn host(name: impl Into<String>) -> Self {
        Target::Host(name.into())
    }

    pub fn label(key: impl Into<String>, value: impl Into<String>) -> Self {
        Target::Label { key: key.into(), value: value.into() }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Any => write!(f, "_any"),
            Target::All => write!(f, "_all"),
            Target::Host(h) => write!(f, "host:{h}"),
            Target::Label { key, value } => write!(f, "label:{key}={value}"),
        }
    }
}

impl FromStr for Target {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s == "_any" {
            return Ok(Target::Any);
        }
        if s == "_all" {
            return Ok(Target::All);
        }
        if let Some(rest) = s.strip_prefix("host:") {
            return Ok(Target::Host(rest.to_string()));
        }
        if let Some(rest) = s.strip_prefix("label:") {
            let (key, value) = rest
                .split_once('=')
                .ok_or_else(|| TargetParseError::MissingLabelSeparator(s.to_string()))?;
            if key.is_empty() || value.is_empty() {
                return Err(TargetParseError::EmptyLabelComponent(s.to_string()));
            }
            return Ok(Target::Label { key: key.to_string(), value: value.to_string() });
        }
        if s.starts_with('_') {
            return Err(TargetParseError::UnknownReservedTarget(s.to_string()));
        }
        // Bare hostname (non-underscore prefix).
        Ok(Target::Host(s.to_string()))
    }
}

impl Serialize for Target {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
