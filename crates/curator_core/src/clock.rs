//! Millisecond wall-clock helper.

use chrono::Utc;

/// Current Unix timestamp in milliseconds.
pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
