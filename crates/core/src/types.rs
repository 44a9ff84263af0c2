use chrono::{Duration, SecondsFormat, Utc};

/// Record identifiers are opaque strings (UUIDv7 when generated here).
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<Utc>;

/// Generate a new collision-resistant record id.
///
/// UUIDv7 embeds a millisecond clock and random bits, so ids also sort
/// roughly by creation time.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::now_v7().to_string()
}

/// Current time, guaranteed to be strictly after `previous`.
///
/// Wall clocks can step backwards or return the same reading twice; a
/// mutation stamp must still move forward.
pub fn advance_from(previous: Timestamp) -> Timestamp {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// Fixed-width RFC 3339 rendering (nanosecond precision, `Z` suffix).
///
/// Every rendering has the same length, so lexicographic order of the
/// strings equals chronological order.
pub fn sortable_timestamp(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
