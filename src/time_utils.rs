// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamps.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as epoch milliseconds.
pub fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render an epoch-milliseconds timestamp as RFC3339 with a `Z` suffix.
///
/// Falls back to the raw number for values outside chrono's range.
pub fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| millis.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_render_as_utc() {
        assert_eq!(millis_to_rfc3339(0), "1970-01-01T00:00:00Z");
        assert_eq!(millis_to_rfc3339(1_700_000_000_000), "2023-11-14T22:13:20Z");
    }
}
