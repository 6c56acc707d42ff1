//! Timestamps as persisted in HQ documents.
//!
//! Every document stores ISO-8601 UTC strings with millisecond precision
//! and a `Z` suffix, e.g. `2025-03-01T09:30:00.123Z`.  Reads are lenient:
//! anything that does not parse falls back to the Unix epoch.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// The current time, truncated to millisecond precision so a written
/// document compares equal to the same document read back.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::<Utc>::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// `1970-01-01T00:00:00.000Z`, the timestamp of a never-written document.
pub fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// Format a timestamp the way documents store it.
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp string.
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a stored timestamp, defaulting to the epoch.
pub fn parse_or_epoch(raw: Option<&str>) -> DateTime<Utc> {
    raw.and_then(parse).unwrap_or_else(epoch)
}

// ---------------------------------------------------------------------------
// Serde helpers
// ---------------------------------------------------------------------------

pub(crate) fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

pub(crate) fn serialize_map<K, S>(
    map: &BTreeMap<K, DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    K: serde::Serialize,
    S: Serializer,
{
    use serde::ser::SerializeMap;

    let mut out = serializer.serialize_map(Some(map.len()))?;
    for (key, ts) in map {
        out.serialize_entry(key, &format(ts))?;
    }
    out.end()
}
