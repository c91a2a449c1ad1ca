use std::collections::{HashMap, HashSet};

use crate::{
    feed::BikeType,
    fleet::{Fleet, events::MovementEvent},
};

#[derive(Debug, Clone, Copy)]
pub struct BikeTypeUsageStat {
    pub bike_type: BikeType,
    pub rented_bike_count: usize,
}

/// Distinct bikes with at least one movement event, counted per bike
/// type, most rented type first, ties broken by label.
pub fn usage(fleet: &Fleet, movements: &[MovementEvent]) -> Vec<BikeTypeUsageStat> {
    let moved: HashSet<u64> = movements.iter().map(|event| event.bike_id).collect();

    let mut counts: HashMap<BikeType, usize> = HashMap::new();
    for timeline in fleet.timelines() {
        if moved.contains(&timeline.bike_id) {
            *counts.entry(timeline.first().bike_type).or_default() += 1;
        }
    }

    let mut rows: Vec<BikeTypeUsageStat> = counts
        .into_iter()
        .map(|(bike_type, rented_bike_count)| BikeTypeUsageStat {
            bike_type,
            rented_bike_count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.rented_bike_count
            .cmp(&a.rented_bike_count)
            .then_with(|| a.bike_type.label().cmp(b.bike_type.label()))
    });
    rows
}
