//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Out-of-range values clamp to the Unix epoch.
    pub fn from_unix_secs(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }

    /// RFC 3339 rendering used in API responses.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_from_unix_secs_roundtrips() {
        let ts = Timestamp::from_unix_secs(1_704_067_200);
        assert_eq!(ts.as_unix_secs(), 1_704_067_200);
    }

    #[test]
    fn timestamp_plus_secs_adds_correctly() {
        let ts = Timestamp::from_unix_secs(1_000);
        assert_eq!(ts.plus_secs(3_600).as_unix_secs(), 4_600);
        assert!(ts.is_before(&ts.plus_secs(1)));
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let ts = Timestamp::from_unix_secs(0);
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, r#""1970-01-01T00:00:00Z""#);
    }
}
