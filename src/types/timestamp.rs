use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Point in time as Pipedrive exchanges it.
///
/// Pipedrive expects wall-clock values without an offset, so no timezone
/// conversion happens here. Build the value in the zone you want sent.
/// The default value is the Unix epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Current UTC time.
    pub fn now() -> Self {
        Self(Utc::now().naive_utc())
    }

    /// Builds a UTC timestamp from Unix epoch seconds. Out-of-range input
    /// yields the epoch.
    pub fn from_unix(secs: i64) -> Self {
        DateTime::from_timestamp(secs, 0)
            .map(|dt| Self(dt.naive_utc()))
            .unwrap_or_default()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == NaiveDateTime::default()
    }

    /// `YYYY-MM-DD`
    pub fn to_date_string(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn to_date_time_string(&self) -> String {
        self.0.format(DATE_TIME_FORMAT).to_string()
    }

    /// Parses either the full date-time form or a bare date (midnight).
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT) {
            return Some(Self(dt));
        }
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_date_time_string())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(value: NaiveDate) -> Self {
        Self(value.and_time(chrono::NaiveTime::default()))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Timestamp {
    fn from(value: DateTime<Tz>) -> Self {
        Self(value.naive_local())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_date_time_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sample() -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 30)
            .unwrap()
            .into()
    }

    #[test]
    fn test_formats() {
        let ts = sample();
        assert_eq!(ts.to_date_string(), "2024-03-07");
        assert_eq!(ts.to_date_time_string(), "2024-03-07 09:05:30");
    }

    #[test]
    fn test_zero_value_formats() {
        let ts = Timestamp::default();
        assert!(ts.is_zero());
        assert_eq!(ts.to_date_string(), "1970-01-01");
        assert_eq!(ts.to_date_time_string(), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_keeps_wall_clock_of_source_zone() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(2024, 3, 7, 23, 30, 0).unwrap();
        let ts = Timestamp::from(dt);
        assert_eq!(ts.to_date_time_string(), "2024-03-07 23:30:00");
    }

    #[test]
    fn test_from_unix() {
        let ts = Timestamp::from_unix(1_700_000_000);
        assert_eq!(ts.to_date_time_string(), "2023-11-14 22:13:20");
        assert!(Timestamp::from_unix(0).is_zero());
    }

    #[test]
    fn test_parse_both_forms() {
        assert_eq!(Timestamp::parse("2024-03-07 09:05:30"), Some(sample()));
        assert_eq!(
            Timestamp::parse("2024-03-07").map(|t| t.to_date_time_string()),
            Some("2024-03-07 00:00:00".to_string())
        );
        assert_eq!(Timestamp::parse("yesterday"), None);
    }

    #[test]
    fn test_serde_uses_full_form() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, "\"2024-03-07 09:05:30\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
