// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hostname and dotted-segment sanitization shared by the subject router,
//! the KV key grammar, and the registry bucket.
//!
//! Sanitization is a many-to-one fold onto `[A-Za-z0-9_-]`: any other
//! character is replaced with `_`. Collisions are possible and accepted —
//! uniqueness of derived keys comes from the clock, not from the hostname.

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}

/// Split a dotted value (`a.b.c`) into its segments, sanitizing each one.
pub fn sanitized_segments(dotted: &str) -> Vec<String> {
    dotted.split('.').map(sanitize).collect()
}

#[cfg(test)]
#[path = "sanitize_tests.rs"]
mod tests;
