use std::{fmt::Display, sync::Arc};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::{feed, shared::Coordinate};

/// One raw record as it appears on a feed line. Every field is optional
/// here so that validation, not deserialization, decides what is
/// missing and can say so precisely.
#[derive(Deserialize, Debug, Clone)]
pub struct RawPing {
    pub bike_id: Option<u64>,
    pub timestamp: Option<String>,
    pub place_name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub bike_type: Option<i64>,
}

impl RawPing {
    /// Checks required fields and parses the timestamp, turning the raw
    /// record into a validated [`Ping`].
    pub fn validate(self, line: usize) -> Result<Ping, feed::Error> {
        let bike_id = self
            .bike_id
            .ok_or(feed::Error::MissingField { line, field: "bike_id" })?;
        let timestamp = self
            .timestamp
            .ok_or(feed::Error::MissingField { line, field: "timestamp" })?;
        let place_name = self
            .place_name
            .ok_or(feed::Error::MissingField { line, field: "place_name" })?;
        let lat = self
            .lat
            .ok_or(feed::Error::MissingField { line, field: "lat" })?;
        let lng = self
            .lng
            .ok_or(feed::Error::MissingField { line, field: "lng" })?;

        let timestamp = parse_timestamp(&timestamp).ok_or(feed::Error::Timestamp {
            line,
            value: timestamp,
        })?;

        Ok(Ping {
            bike_id,
            timestamp,
            place_name: place_name.into(),
            coordinate: Coordinate {
                latitude: lat,
                longitude: lng,
            },
            bike_type: self.bike_type.into(),
        })
    }
}

/// Parses an ISO-8601 timestamp, with or without an explicit offset.
/// Offset-less values are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// One validated, timestamped location observation for a bike.
#[derive(Debug, Clone)]
pub struct Ping {
    pub bike_id: u64,
    pub timestamp: DateTime<Utc>,
    pub place_name: Arc<str>,
    pub coordinate: Coordinate,
    pub bike_type: BikeType,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BikeType {
    Standard,
    EBike,
    Cargo,
    Special,
    #[default]
    Unknown,
}

impl From<Option<i64>> for BikeType {
    fn from(value: Option<i64>) -> Self {
        // Codes outside the known mapping are kept as Unknown, never dropped.
        match value {
            Some(299) => Self::Standard,
            Some(300) => Self::EBike,
            Some(301) => Self::Cargo,
            Some(305) => Self::Special,
            _ => Self::Unknown,
        }
    }
}

impl BikeType {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard bike",
            Self::EBike => "E-bike",
            Self::Cargo => "Cargo bike",
            Self::Special => "Special bike",
            Self::Unknown => "Unknown",
        }
    }
}

impl Display for BikeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[test]
fn valid_timestamp_test_1() {
    let parsed = parse_timestamp("2025-03-01T08:00:00Z").unwrap();
    assert_eq!(parsed.to_rfc3339(), "2025-03-01T08:00:00+00:00");
}

#[test]
fn valid_timestamp_test_2() {
    let parsed = parse_timestamp("2025-03-01T08:00:00+01:00").unwrap();
    assert_eq!(parsed.to_rfc3339(), "2025-03-01T07:00:00+00:00");
}

#[test]
fn valid_timestamp_test_3() {
    let parsed = parse_timestamp("2025-03-01T08:00:00").unwrap();
    assert_eq!(parsed.to_rfc3339(), "2025-03-01T08:00:00+00:00");
}

#[test]
fn invalid_timestamp_test() {
    assert!(parse_timestamp("01.03.2025 08:00").is_none());
}

#[test]
fn bike_type_code_test() {
    assert_eq!(BikeType::from(Some(299)), BikeType::Standard);
    assert_eq!(BikeType::from(Some(300)), BikeType::EBike);
    assert_eq!(BikeType::from(Some(301)), BikeType::Cargo);
    assert_eq!(BikeType::from(Some(305)), BikeType::Special);
    assert_eq!(BikeType::from(Some(404)), BikeType::Unknown);
    assert_eq!(BikeType::from(None), BikeType::Unknown);
}
