use std::fmt;

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeDelta, Utc};
use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unix seconds of the reference instant, `2025-09-23T12:00:00Z`.
pub const REFERENCE_EPOCH_SECONDS: i64 = 1_758_628_800;

/// Length of the simulated history, in days.
pub const HISTORY_DAYS: i64 = 3 * 365;

/// UTC instant serialized as RFC 3339 with an explicit `+00:00` offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Midnight UTC of `date`.
    pub fn start_of(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    pub fn plus_days(self, days: i64) -> Self {
        Self(self.0 + TimeDelta::days(days))
    }

    pub fn minus_days(self, days: i64) -> Self {
        Self(self.0 - TimeDelta::days(days))
    }

    pub fn minus_seconds(self, seconds: i64) -> Self {
        Self(self.0 - TimeDelta::seconds(seconds))
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, false)
    }

    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(value).map(|dt| Self(dt.with_timezone(&Utc)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(D::Error::custom)
    }
}

impl JsonSchema for Timestamp {
    fn schema_name() -> String {
        "Timestamp".to_string()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            format: Some("date-time".to_string()),
            ..Default::default()
        }
        .into()
    }
}

/// Fixed time frame every generated timestamp is derived from.
///
/// Stages never read the wall clock: each timestamp is an upstream anchor
/// plus an index-derived offset, which keeps runs reproducible and makes
/// every derived timestamp at least as late as its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    reference: Timestamp,
}

impl Clock {
    pub fn fixed() -> Self {
        let reference = DateTime::from_timestamp(REFERENCE_EPOCH_SECONDS, 0).unwrap_or_default();
        Self {
            reference: Timestamp(reference),
        }
    }

    /// The "now" of the simulated world; also every record's `updated_at`.
    pub fn reference(&self) -> Timestamp {
        self.reference
    }

    /// First instant of the simulated history.
    pub fn history_start(&self) -> Timestamp {
        self.reference.minus_days(HISTORY_DAYS)
    }

    /// Whole-day offset spreading item `position` (0-based) of `total` items
    /// evenly across the history window.
    pub fn spread_days(position: u64, total: u64) -> i64 {
        if total == 0 {
            return 0;
        }
        (position as i64 * HISTORY_DAYS) / total as i64
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::fixed()
    }
}
