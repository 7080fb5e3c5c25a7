//! Remote timestamp wire format
//!
//! The backend exchanges timestamps as `yyyy-MM-ddTHH:mm:ss.SSSZ` in UTC.
//! Parsing is lenient: any RFC 3339 timestamp, a naive `timestamp without
//! time zone`, or a bare date is accepted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub fn format(value: &DateTime<Utc>) -> String {
    value.format(WIRE_FORMAT).to_string()
}

pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    Err(format!("unrecognized timestamp: {raw}"))
}

/// `#[serde(with = "wire_time::option")]` for `Option<DateTime<Utc>>`
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&super::format(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => super::parse(&s).map(Some).map_err(de::Error::custom),
        }
    }
}
