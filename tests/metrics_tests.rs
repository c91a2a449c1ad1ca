use velostat::{
    feed::{BikeType, FeedReader, Ping, parse_timestamp},
    fleet::{
        Fleet,
        events::{IdleInterval, LocationPolicy, MovementEvent, derive, hours_between},
    },
    metrics::{self, Config, idle, rentals, rentals::DayType, snapshot, stations, unused},
    shared::Coordinate,
};

fn ping(bike_id: u64, timestamp: &str, place: &str, lat: f64, lng: f64) -> Ping {
    Ping {
        bike_id,
        timestamp: parse_timestamp(timestamp).unwrap(),
        place_name: place.into(),
        coordinate: Coordinate::from((lat, lng)),
        bike_type: BikeType::Unknown,
    }
}

fn movement(bike_id: u64, timestamp: &str, from: &str, to: &str) -> MovementEvent {
    MovementEvent {
        bike_id,
        timestamp: parse_timestamp(timestamp).unwrap(),
        from_place: from.into(),
        to_place: to.into(),
    }
}

fn interval(bike_id: u64, place: &str, start: &str, end: &str) -> IdleInterval {
    let start_time = parse_timestamp(start).unwrap();
    let end_time = parse_timestamp(end).unwrap();
    IdleInterval {
        bike_id,
        place_name: place.into(),
        start_time,
        end_time,
        duration_hours: hours_between(start_time, end_time),
    }
}

#[test]
fn hourly_rentals_test() {
    // Three bikes move at 08:15 on a Monday.
    let movements = vec![
        movement(1, "2025-03-03T08:15:00Z", "A", "B"),
        movement(2, "2025-03-03T08:15:00Z", "A", "C"),
        movement(3, "2025-03-03T08:15:00Z", "B", "C"),
    ];
    let buckets = rentals::hourly_rentals(&movements);

    assert_eq!(buckets.len(), 48);
    for bucket in &buckets {
        if bucket.hour == 8 && bucket.day_type == DayType::Weekday {
            assert_eq!(bucket.distinct_bike_count, 3);
        } else {
            assert_eq!(bucket.distinct_bike_count, 0);
        }
    }
}

#[test]
fn hourly_rentals_distinct_bikes_test() {
    // One bike moving twice in the same bucket counts once.
    let movements = vec![
        movement(1, "2025-03-03T08:05:00Z", "A", "B"),
        movement(1, "2025-03-03T08:55:00Z", "B", "A"),
    ];
    let buckets = rentals::hourly_rentals(&movements);
    let bucket = buckets
        .iter()
        .find(|b| b.hour == 8 && b.day_type == DayType::Weekday)
        .unwrap();
    assert_eq!(bucket.distinct_bike_count, 1);
}

#[test]
fn empty_idle_summary_is_undefined_test() {
    let summary = idle::summarize(&[]);
    assert_eq!(summary.mean_hours, None);
    assert_eq!(summary.median_hours, None);
    assert_eq!(summary.max_hours, None);
}

#[test]
fn idle_summary_test() {
    let idles = vec![
        interval(1, "A", "2025-03-03T08:00:00Z", "2025-03-03T09:00:00Z"),
        interval(2, "A", "2025-03-03T08:00:00Z", "2025-03-03T10:00:00Z"),
        interval(3, "B", "2025-03-03T00:00:00Z", "2025-03-03T10:00:00Z"),
    ];
    let summary = idle::summarize(&idles);
    assert_eq!(summary.mean_hours, Some(13.0 / 3.0));
    assert_eq!(summary.median_hours, Some(2.0));
    assert_eq!(summary.max_hours, Some(10.0));
}

#[test]
fn idle_top_stations_test() {
    let idles = vec![
        interval(1, "Slow", "2025-03-03T00:00:00Z", "2025-03-03T10:00:00Z"),
        interval(2, "Slow", "2025-03-03T00:00:00Z", "2025-03-03T02:00:00Z"),
        interval(3, "Fast", "2025-03-03T08:00:00Z", "2025-03-03T09:00:00Z"),
        interval(4, "Also Fast", "2025-03-03T08:00:00Z", "2025-03-03T09:00:00Z"),
    ];
    let rows = idle::top_stations(&idles, 10);

    assert_eq!(rows.len(), 3);
    assert_eq!(&*rows[0].place_name, "Slow");
    assert_eq!(rows[0].mean_idle_hours, 6.0);
    assert_eq!(rows[0].sample_count, 2);
    // Equal means fall back to alphabetical order.
    assert_eq!(&*rows[1].place_name, "Also Fast");
    assert_eq!(&*rows[2].place_name, "Fast");

    let top_one = idle::top_stations(&idles, 1);
    assert_eq!(top_one.len(), 1);
    assert_eq!(&*top_one[0].place_name, "Slow");
}

#[test]
fn station_usage_conserves_movements_test() {
    let movements = vec![
        movement(1, "2025-03-03T08:00:00Z", "A", "B"),
        movement(2, "2025-03-03T09:00:00Z", "A", "C"),
        movement(3, "2025-03-03T10:00:00Z", "B", "A"),
    ];
    let rows = stations::usage(&movements);

    let pickups: usize = rows.iter().map(|row| row.pickup_count).sum();
    let dropoffs: usize = rows.iter().map(|row| row.dropoff_count).sum();
    assert_eq!(pickups, movements.len());
    assert_eq!(dropoffs, movements.len());
}

#[test]
fn station_ranking_test() {
    let movements = vec![
        movement(1, "2025-03-03T08:00:00Z", "Busy", "Quiet"),
        movement(2, "2025-03-03T09:00:00Z", "Busy", "Quiet"),
        movement(3, "2025-03-03T10:00:00Z", "Calm", "Busy"),
        movement(4, "2025-03-03T11:00:00Z", "Alike", "Busy"),
    ];

    let pickups = stations::top_pickups(&movements, 5);
    assert_eq!(&*pickups[0].place_name, "Busy");
    assert_eq!(pickups[0].count, 2);
    // Ties are alphabetical.
    assert_eq!(&*pickups[1].place_name, "Alike");
    assert_eq!(&*pickups[2].place_name, "Calm");

    let dropoffs = stations::top_dropoffs(&movements, 1);
    assert_eq!(dropoffs.len(), 1);
    assert_eq!(&*dropoffs[0].place_name, "Busy");
    assert_eq!(dropoffs[0].count, 2);
}

#[test]
fn unused_bike_boundary_test() {
    // Bike 10: zero movements. Bike 11: exactly one. Bike 12: two.
    let fleet = Fleet::new().from_pings(vec![
        ping(10, "2025-03-03T08:00:00Z", "Depot", 1.0, 1.0),
        ping(10, "2025-03-03T12:00:00Z", "Depot", 1.0, 1.0),
        ping(11, "2025-03-03T08:00:00Z", "Depot", 1.0, 1.0),
        ping(11, "2025-03-03T10:00:00Z", "Plaza", 2.0, 2.0),
        ping(12, "2025-03-03T08:00:00Z", "Depot", 1.0, 1.0),
        ping(12, "2025-03-03T09:00:00Z", "Plaza", 2.0, 2.0),
        ping(12, "2025-03-03T10:00:00Z", "Depot", 1.0, 1.0),
    ]);
    let derivation = derive(&fleet, LocationPolicy::ByStationName);
    let rows = unused::top_stations(&fleet, &derivation.movements, 10);

    let total_unused: usize = rows.iter().map(|row| row.unused_bike_count).sum();
    assert_eq!(total_unused, 2);

    // Bike 10 sits at Depot with a 4 hour span, bike 11 ends at Plaza
    // with a 2 hour span. Bike 12 moved twice and is not unused.
    let depot = rows.iter().find(|row| &*row.place_name == "Depot").unwrap();
    assert_eq!(depot.unused_bike_count, 1);
    assert_eq!(depot.avg_idle_span_hours, 4.0);
    let plaza = rows.iter().find(|row| &*row.place_name == "Plaza").unwrap();
    assert_eq!(plaza.unused_bike_count, 1);
    assert_eq!(plaza.avg_idle_span_hours, 2.0);
}

#[test]
fn single_ping_bike_is_unused_test() {
    let fleet = Fleet::new().from_pings(vec![ping(2, "2025-03-03T10:00:00Z", "Harbour", 1.0, 2.0)]);
    let derivation = derive(&fleet, LocationPolicy::ByStationName);
    let rows = unused::top_stations(&fleet, &derivation.movements, 10);

    assert_eq!(rows.len(), 1);
    assert_eq!(&*rows[0].place_name, "Harbour");
    assert_eq!(rows[0].unused_bike_count, 1);
    assert_eq!(rows[0].avg_idle_span_hours, 0.0);
}

#[test]
fn snapshot_counts_test() {
    let fleet = Fleet::new().from_pings(vec![
        ping(1, "2025-03-03T08:00:00Z", "A", 1.0, 1.0),
        ping(1, "2025-03-03T12:00:00Z", "A", 1.0, 1.0),
        ping(2, "2025-03-03T12:00:00Z", "A", 1.0, 1.0),
        ping(3, "2025-03-03T12:00:00Z", "B", 2.0, 2.0),
        // Bike 4 was last seen before the snapshot instant and is not counted.
        ping(4, "2025-03-03T11:59:00Z", "B", 2.0, 2.0),
    ]);
    let rows = snapshot::station_counts(&fleet);

    assert_eq!(rows.len(), 2);
    assert_eq!(&*rows[0].place_name, "A");
    assert_eq!(rows[0].bike_count, 2);
    assert_eq!(&*rows[1].place_name, "B");
    assert_eq!(rows[1].bike_count, 1);
}

#[test]
fn snapshot_empty_fleet_test() {
    let rows = snapshot::station_counts(&Fleet::new());
    assert!(rows.is_empty());
}

#[test]
fn analyze_fixture_test() {
    let path = format!("{}/tests/data/pings.jsonl", env!("CARGO_MANIFEST_DIR"));
    let fleet = Fleet::new()
        .load_feed(FeedReader::new().from_jsonl(path))
        .unwrap();
    let report = metrics::analyze(&fleet, &Config::default());

    // Idle intervals: 1.0h and 2.5h at bike 1, 24h at bike 4.
    assert_eq!(report.idle_summary.mean_hours, Some(27.5 / 3.0));
    assert_eq!(report.idle_summary.median_hours, Some(2.5));
    assert_eq!(report.idle_summary.max_hours, Some(24.0));

    assert_eq!(&*report.station_idle_top[0].place_name, "Harbour");
    assert_eq!(report.station_idle_top[0].mean_idle_hours, 24.0);

    // All movements happened on Monday 2025-03-03.
    let moved_hours: Vec<(u8, usize)> = report
        .hourly_rentals
        .iter()
        .filter(|bucket| bucket.distinct_bike_count > 0)
        .map(|bucket| {
            assert_eq!(bucket.day_type, DayType::Weekday);
            (bucket.hour, bucket.distinct_bike_count)
        })
        .collect();
    assert_eq!(moved_hours, vec![(8, 1), (9, 1), (12, 1)]);

    // Bike 1 moved once, bike 3 twice; bikes 1, 2 and 4 are unused.
    assert_eq!(&*report.unused_stations_top[0].place_name, "Harbour");
    assert_eq!(report.unused_stations_top[0].unused_bike_count, 2);
    assert_eq!(report.unused_stations_top[0].avg_idle_span_hours, 12.0);
    assert_eq!(&*report.unused_stations_top[1].place_name, "Station B");
    assert_eq!(report.unused_stations_top[1].unused_bike_count, 1);

    let pickup_names: Vec<&str> = report
        .top_pickup_stations
        .iter()
        .map(|row| &*row.place_name)
        .collect();
    assert_eq!(pickup_names, vec!["Station A", "Station C", "Station D"]);

    let dropoff_names: Vec<&str> = report
        .top_dropoff_stations
        .iter()
        .map(|row| &*row.place_name)
        .collect();
    assert_eq!(dropoff_names, vec!["Station B", "Station C", "Station D"]);

    // T_max is 12:00: bike 1 at Station B, bike 3 at Station C.
    assert_eq!(report.station_snapshot.len(), 2);
    assert_eq!(&*report.station_snapshot[0].place_name, "Station B");
    assert_eq!(&*report.station_snapshot[1].place_name, "Station C");

    // Bikes 1 (Standard) and 3 (unknown code 404) moved.
    assert_eq!(report.bike_type_usage.len(), 2);
    assert_eq!(report.bike_type_usage[0].bike_type, BikeType::Standard);
    assert_eq!(report.bike_type_usage[0].rented_bike_count, 1);
    assert_eq!(report.bike_type_usage[1].bike_type, BikeType::Unknown);
    assert_eq!(report.bike_type_usage[1].rented_bike_count, 1);
}
