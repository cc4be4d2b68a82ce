//! Timestamp helpers.
//!
//! All timestamps in the system are integer microseconds since the Unix
//! epoch, both in storage and on the wire.

use chrono::Utc;

/// Current time in microseconds since the epoch.
pub fn now_micros() -> i64 {
    Utc::now().timestamp_micros()
}
