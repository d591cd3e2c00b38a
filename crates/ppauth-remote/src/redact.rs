// SPDX-FileCopyrightText: 2026 ppauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for log records.

use std::sync::LazyLock;

use regex::Regex;

static BEARER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Bearer\s+[A-Za-z0-9._~+/=\-]+").expect("bearer pattern is valid")
});

const REDACTED: &str = "[REDACTED]";

/// Replace bearer credentials and any of the given exact values with `[REDACTED]`.
///
/// Longer values are replaced first so a secret that contains another is
/// not left half-visible.
pub fn redact(input: &str, secrets: &[&str]) -> String {
    let mut result = BEARER_PATTERN
        .replace_all(input, format!("Bearer {REDACTED}"))
        .into_owned();

    let mut sorted: Vec<&str> = secrets.iter().copied().filter(|s| !s.is_empty()).collect();
    sorted.sort_by_key(|s| std::cmp::Reverse(s.len()));
    for secret in sorted {
        result = result.replace(secret, REDACTED);
    }

    result
}
