use std::{collections::HashMap, sync::Arc};

use crate::{
    fleet::{Fleet, events::MovementEvent},
    shared::Coordinate,
};

/// A station holding bikes that went effectively unridden: bikes with
/// at most one movement event over the whole observed window.
#[derive(Debug, Clone)]
pub struct UnusedStationStat {
    pub place_name: Arc<str>,
    pub coordinate: Coordinate,
    pub unused_bike_count: usize,
    pub avg_idle_span_hours: f64,
}

#[derive(Default)]
struct Group {
    bike_count: usize,
    span_sum_hours: f64,
    coordinates: Vec<Coordinate>,
}

/// Top `n` stations by unused-bike count, fullest first, ties broken by
/// station name. A bike belongs to the station of its most recent ping;
/// its idle span is the elapsed time between its first and last
/// observed ping (zero for a single-ping bike). The reported coordinate
/// is the mean of the member bikes' last known positions.
pub fn top_stations(
    fleet: &Fleet,
    movements: &[MovementEvent],
    n: usize,
) -> Vec<UnusedStationStat> {
    let mut movement_counts: HashMap<u64, usize> = HashMap::new();
    for event in movements {
        *movement_counts.entry(event.bike_id).or_default() += 1;
    }

    let mut groups: HashMap<Arc<str>, Group> = HashMap::new();
    for timeline in fleet.timelines() {
        let moves = movement_counts
            .get(&timeline.bike_id)
            .copied()
            .unwrap_or(0);
        // Zero or one observed movement is treated as effectively stationary.
        if moves > 1 {
            continue;
        }
        let last = timeline.last();
        let group = groups.entry(last.place_name.clone()).or_default();
        group.bike_count += 1;
        group.span_sum_hours += timeline.span_hours();
        group.coordinates.push(last.coordinate);
    }

    let mut rows: Vec<UnusedStationStat> = groups
        .into_iter()
        .map(|(place_name, group)| UnusedStationStat {
            place_name,
            coordinate: group.coordinates.into_iter().sum(),
            avg_idle_span_hours: group.span_sum_hours / group.bike_count as f64,
            unused_bike_count: group.bike_count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.unused_bike_count
            .cmp(&a.unused_bike_count)
            .then_with(|| a.place_name.cmp(&b.place_name))
    });
    rows.truncate(n);
    rows
}
