use std::{collections::HashMap, sync::Arc};

use crate::fleet::events::MovementEvent;

/// Pickup and drop-off totals for one station. A pickup is the station
/// appearing as a movement's origin, a drop-off as its destination.
#[derive(Debug, Clone)]
pub struct StationUsageStat {
    pub place_name: Arc<str>,
    pub pickup_count: usize,
    pub dropoff_count: usize,
}

#[derive(Debug, Clone)]
pub struct RankedStation {
    pub place_name: Arc<str>,
    pub count: usize,
}

/// Usage totals for every station touched by a movement event, sorted
/// by station name. Summing either column over all rows gives the total
/// movement count.
pub fn usage(movements: &[MovementEvent]) -> Vec<StationUsageStat> {
    let mut counts: HashMap<Arc<str>, (usize, usize)> = HashMap::new();
    for event in movements {
        counts.entry(event.from_place.clone()).or_default().0 += 1;
        counts.entry(event.to_place.clone()).or_default().1 += 1;
    }

    let mut rows: Vec<StationUsageStat> = counts
        .into_iter()
        .map(|(place_name, (pickup_count, dropoff_count))| StationUsageStat {
            place_name,
            pickup_count,
            dropoff_count,
        })
        .collect();
    rows.sort_by(|a, b| a.place_name.cmp(&b.place_name));
    rows
}

/// Top `k` stations by pickup volume, busiest first, ties broken by
/// station name.
pub fn top_pickups(movements: &[MovementEvent], k: usize) -> Vec<RankedStation> {
    rank(movements, |stat| stat.pickup_count, k)
}

/// Top `k` stations by drop-off volume, busiest first, ties broken by
/// station name.
pub fn top_dropoffs(movements: &[MovementEvent], k: usize) -> Vec<RankedStation> {
    rank(movements, |stat| stat.dropoff_count, k)
}

fn rank<F>(movements: &[MovementEvent], key: F, k: usize) -> Vec<RankedStation>
where
    F: Fn(&StationUsageStat) -> usize,
{
    let mut rows: Vec<RankedStation> = usage(movements)
        .into_iter()
        .filter_map(|stat| {
            let count = key(&stat);
            (count > 0).then_some(RankedStation {
                place_name: stat.place_name,
                count,
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.place_name.cmp(&b.place_name))
    });
    rows.truncate(k);
    rows
}
