//! # Temporal Types — UTC Timestamps and Calendar Dates
//!
//! [`Timestamp`] is used for `issuanceDate`: UTC only, seconds precision,
//! rendered `YYYY-MM-DDTHH:MM:SSZ`. Non-UTC inputs are rejected at parse time.
//!
//! [`CalendarDate`] is the year/month/day triple the age-threshold circuit
//! compares. Its derived ordering is chronological.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TemporalError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// Serde goes through [`Timestamp::to_iso8601`] and [`Timestamp::parse`], so
/// deserialization enforces the same `Z`-only rule as parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// From a `DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// Parse an RFC 3339 string. Only the `Z` suffix is accepted.
    pub fn parse(s: &str) -> Result<Self, TemporalError> {
        if !s.ends_with('Z') {
            return Err(TemporalError::InvalidTimestamp(
                s.to_string(),
                "timestamp must use Z suffix (UTC only)".to_string(),
            ));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| TemporalError::InvalidTimestamp(s.to_string(), e.to_string()))?;
        Ok(Self::from_utc(dt.with_timezone(&Utc)))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// The calendar date (UTC) of this instant.
    pub fn date(&self) -> CalendarDate {
        CalendarDate {
            year: self.0.year().max(0) as u32,
            month: self.0.month(),
            day: self.0.day(),
        }
    }

    /// Render as ISO8601 with Z suffix.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A validated Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    /// Year (e.g. 1994).
    pub year: u32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month, 1-31.
    pub day: u32,
}

impl CalendarDate {
    /// Build a date, rejecting impossible triples (e.g. 2023-02-29).
    pub fn new(year: u32, month: u32, day: u32) -> Result<Self, TemporalError> {
        let y = i32::try_from(year).map_err(|_| TemporalError::InvalidDate { year, month, day })?;
        NaiveDate::from_ymd_opt(y, month, day)
            .map(|_| Self { year, month, day })
            .ok_or(TemporalError::InvalidDate { year, month, day })
    }

    /// Today's date in UTC.
    pub fn today() -> Self {
        Timestamp::now().date()
    }

    /// Parse `YYYY-MM-DD`.
    pub fn parse(s: &str) -> Result<Self, TemporalError> {
        let d = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| TemporalError::InvalidTimestamp(s.to_string(), e.to_string()))?;
        Self::new(d.year().max(0) as u32, d.month(), d.day())
    }

    /// The date `years` later. A 29 February anniversary in a non-leap year
    /// falls on 1 March, so an age is reached on the first day it has
    /// fully elapsed.
    pub fn add_years(&self, years: u32) -> Self {
        let year = self.year.saturating_add(years);
        match Self::new(year, self.month, self.day) {
            Ok(d) => d,
            Err(_) => Self {
                year,
                month: 3,
                day: 1,
            },
        }
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
