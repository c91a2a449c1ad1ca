use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tracing::warn;

use crate::fleet::Fleet;

#[derive(Debug, Clone)]
pub struct StationSnapshotStat {
    pub place_name: Arc<str>,
    pub bike_count: usize,
}

/// Bikes per station among pings stamped at the dataset's single latest
/// instant, fullest station first, ties broken by name.
///
/// Known limitation: bikes whose last ping slightly precedes that
/// instant are not counted, so stations can be undercounted when the
/// fleet was not sampled at one precise moment. The undercount is
/// reported, never corrected.
pub fn station_counts(fleet: &Fleet) -> Vec<StationSnapshotStat> {
    let Some(t_max) = fleet.pings().iter().map(|ping| ping.timestamp).max() else {
        return Vec::new();
    };

    let mut groups: HashMap<Arc<str>, HashSet<u64>> = HashMap::new();
    let mut covered: HashSet<u64> = HashSet::new();
    for ping in fleet.pings().iter().filter(|ping| ping.timestamp == t_max) {
        groups
            .entry(ping.place_name.clone())
            .or_default()
            .insert(ping.bike_id);
        covered.insert(ping.bike_id);
    }

    if covered.len() * 2 < fleet.bike_count() {
        warn!(
            "Snapshot at {} covers {} of {} bikes; stations whose bikes were last seen earlier are undercounted",
            t_max,
            covered.len(),
            fleet.bike_count()
        );
    }

    let mut rows: Vec<StationSnapshotStat> = groups
        .into_iter()
        .map(|(place_name, bikes)| StationSnapshotStat {
            place_name,
            bike_count: bikes.len(),
        })
        .collect();
    rows.sort_by(|a, b| {
        b.bike_count
            .cmp(&a.bike_count)
            .then_with(|| a.place_name.cmp(&b.place_name))
    });
    rows
}
