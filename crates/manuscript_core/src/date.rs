use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

/// Date-times without an offset are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized publish date {0:?}")]
pub struct DateParseError(pub String);

/// Publish date from front matter: the text as written plus the instant it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishDate {
    raw: String,
    instant: DateTime<FixedOffset>,
}

impl PublishDate {
    /// Accepts RFC 3339, `YYYY-MM-DD[ T]HH:MM[:SS[.fff]]` and `YYYY-MM-DD`.
    pub fn parse(raw: &str) -> Result<Self, DateParseError> {
        let trimmed = raw.trim();
        let instant = parse_instant(trimmed).ok_or_else(|| DateParseError(raw.to_string()))?;
        Ok(Self {
            raw: trimmed.to_string(),
            instant,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.instant
    }

    pub fn to_rfc2822(&self) -> String {
        self.instant.to_rfc2822()
    }
}

impl fmt::Display for PublishDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for PublishDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

fn parse_instant(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant);
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}
