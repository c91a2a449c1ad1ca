use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::fleet::events::MovementEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn from_timestamp(timestamp: &DateTime<Utc>) -> Self {
        // Monday is weekday index 0; Saturday and Sunday are 5 and 6.
        if timestamp.weekday().num_days_from_monday() >= 5 {
            Self::Weekend
        } else {
            Self::Weekday
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyRentalBucket {
    pub hour: u8,
    pub day_type: DayType,
    pub distinct_bike_count: usize,
}

/// Distinct moving bikes per (hour of day, day type). All 48 buckets
/// are always present, unobserved combinations with count 0: the
/// weekday block first, then the weekend block, hours ascending. A bike
/// moving twice within the same bucket counts once.
pub fn hourly_rentals(movements: &[MovementEvent]) -> Vec<HourlyRentalBucket> {
    let mut buckets: HashMap<(u8, DayType), HashSet<u64>> = HashMap::new();
    for event in movements {
        let hour = event.timestamp.hour() as u8;
        let day_type = DayType::from_timestamp(&event.timestamp);
        buckets.entry((hour, day_type)).or_default().insert(event.bike_id);
    }

    let mut rows = Vec::with_capacity(48);
    for day_type in [DayType::Weekday, DayType::Weekend] {
        for hour in 0..24u8 {
            let distinct_bike_count = buckets
                .get(&(hour, day_type))
                .map(|bikes| bikes.len())
                .unwrap_or(0);
            rows.push(HourlyRentalBucket {
                hour,
                day_type,
                distinct_bike_count,
            });
        }
    }
    rows
}

#[test]
fn day_type_weekday_test() {
    // 2025-03-03 was a Monday.
    let monday = crate::feed::parse_timestamp("2025-03-03T08:15:00Z").unwrap();
    assert_eq!(DayType::from_timestamp(&monday), DayType::Weekday);
    // 2025-03-07 was a Friday.
    let friday = crate::feed::parse_timestamp("2025-03-07T23:59:00Z").unwrap();
    assert_eq!(DayType::from_timestamp(&friday), DayType::Weekday);
}

#[test]
fn day_type_weekend_test() {
    // 2025-03-01 was a Saturday, 2025-03-02 a Sunday.
    let saturday = crate::feed::parse_timestamp("2025-03-01T00:00:00Z").unwrap();
    assert_eq!(DayType::from_timestamp(&saturday), DayType::Weekend);
    let sunday = crate::feed::parse_timestamp("2025-03-02T12:00:00Z").unwrap();
    assert_eq!(DayType::from_timestamp(&sunday), DayType::Weekend);
}
