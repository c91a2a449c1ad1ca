use crate::fleet::{
    Fleet,
    events::{self, LocationPolicy},
};

pub mod bike_types;
pub mod idle;
pub mod rentals;
pub mod snapshot;
pub mod stations;
pub mod unused;

/// Knobs for one analysis run.
#[derive(Debug, Clone)]
pub struct Config {
    pub policy: LocationPolicy,
    /// Stations reported in the idle-duration ranking.
    pub station_idle_top_n: usize,
    /// Stations reported in the unused-bike ranking.
    pub unused_top_n: usize,
    /// Stations reported in each of the pickup/drop-off rankings.
    pub station_rank_top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: LocationPolicy::default(),
            station_idle_top_n: 10,
            unused_top_n: 10,
            station_rank_top_k: 5,
        }
    }
}

/// The named result sets of one run, handed as-is to whatever renders
/// them. Plain recomputed values; nothing here refers back into the
/// fleet or carries state between runs.
#[derive(Debug)]
pub struct Report {
    pub hourly_rentals: Vec<rentals::HourlyRentalBucket>,
    pub idle_summary: idle::IdleSummary,
    pub station_idle_top: Vec<idle::StationIdleStat>,
    pub unused_stations_top: Vec<unused::UnusedStationStat>,
    pub top_pickup_stations: Vec<stations::RankedStation>,
    pub top_dropoff_stations: Vec<stations::RankedStation>,
    pub station_snapshot: Vec<snapshot::StationSnapshotStat>,
    pub bike_type_usage: Vec<bike_types::BikeTypeUsageStat>,
}

/// One-shot batch analysis. Events are derived once under the
/// configured location policy and every aggregator consumes that single
/// derivation.
pub fn analyze(fleet: &Fleet, config: &Config) -> Report {
    let derivation = events::derive(fleet, config.policy);
    Report {
        hourly_rentals: rentals::hourly_rentals(&derivation.movements),
        idle_summary: idle::summarize(&derivation.idles),
        station_idle_top: idle::top_stations(&derivation.idles, config.station_idle_top_n),
        unused_stations_top: unused::top_stations(
            fleet,
            &derivation.movements,
            config.unused_top_n,
        ),
        top_pickup_stations: stations::top_pickups(
            &derivation.movements,
            config.station_rank_top_k,
        ),
        top_dropoff_stations: stations::top_dropoffs(
            &derivation.movements,
            config.station_rank_top_k,
        ),
        station_snapshot: snapshot::station_counts(fleet),
        bike_type_usage: bike_types::usage(fleet, &derivation.movements),
    }
}
