//! Timestamp helpers.
//!
//! The store sorts `createdAt` as plain strings, so every timestamp this crate
//! writes uses one fixed layout: RFC 3339, UTC, millisecond precision
//! (`2024-05-01T12:30:00.250Z`). Reading accepts any RFC 3339 value.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current time truncated to the precision that is written to the store.
#[must_use]
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

/// Formats a timestamp in the wire layout.
#[must_use]
pub fn to_wire(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats a timestamp as a short calendar date, e.g. `May 1, 2024`.
#[must_use]
pub fn display_date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// Serde adapter writing timestamps with [`to_wire`].
pub mod wire {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::to_wire(ts))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
