use std::{sync::Arc, time::Instant};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    feed::Ping,
    fleet::{Fleet, Timeline},
};

/// How two pings are judged to be at the same location. The two modes
/// are not guaranteed to agree: a station's recorded coordinate can
/// drift between pings of an otherwise stationary bike. A run picks one
/// mode and never mixes them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LocationPolicy {
    /// Locations differ iff the recorded station name differs. Robust
    /// to GPS jitter at a parked bike.
    #[default]
    ByStationName,
    /// Locations differ iff the recorded coordinate pair differs.
    ByCoordinate,
}

impl LocationPolicy {
    fn moved(&self, prev: &Ping, curr: &Ping) -> bool {
        match self {
            Self::ByStationName => prev.place_name != curr.place_name,
            Self::ByCoordinate => prev.coordinate != curr.coordinate,
        }
    }
}

/// An adjacent ping pair whose location changed: the bike left
/// `from_place` and was next seen at `to_place`.
#[derive(Debug, Clone)]
pub struct MovementEvent {
    pub bike_id: u64,
    pub timestamp: DateTime<Utc>,
    pub from_place: Arc<str>,
    pub to_place: Arc<str>,
}

/// An adjacent ping pair whose location did not change: the bike sat at
/// `place_name` for the whole interval.
#[derive(Debug, Clone)]
pub struct IdleInterval {
    pub bike_id: u64,
    pub place_name: Arc<str>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_hours: f64,
}

/// Everything one derivation pass emits. Each adjacent pair of every
/// timeline lands in exactly one of the two sets.
#[derive(Debug, Default)]
pub struct Derivation {
    pub movements: Vec<MovementEvent>,
    pub idles: Vec<IdleInterval>,
}

pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 3_600_000.0
}

/// Scans every timeline and classifies each adjacent ping pair as a
/// movement or a continuation under `policy`. Timelines are independent
/// and are scanned in parallel; the merge keeps ascending bike order,
/// so a given input always yields the same event sequence.
pub fn derive(fleet: &Fleet, policy: LocationPolicy) -> Derivation {
    debug!("Deriving events...");
    let now = Instant::now();

    let timelines: Vec<Timeline> = fleet.timelines().collect();
    let per_bike: Vec<Derivation> = timelines
        .par_iter()
        .map(|timeline| scan_timeline(timeline, policy))
        .collect();

    let mut merged = Derivation::default();
    for part in per_bike {
        merged.movements.extend(part.movements);
        merged.idles.extend(part.idles);
    }

    debug!(
        "Deriving {} movements and {} idle intervals took {:?}",
        merged.movements.len(),
        merged.idles.len(),
        now.elapsed()
    );
    merged
}

fn scan_timeline(timeline: &Timeline, policy: LocationPolicy) -> Derivation {
    let mut out = Derivation::default();
    // A timeline with fewer than 2 pings has no adjacent pairs.
    for pair in timeline.pings.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if policy.moved(prev, curr) {
            out.movements.push(MovementEvent {
                bike_id: curr.bike_id,
                timestamp: curr.timestamp,
                from_place: prev.place_name.clone(),
                to_place: curr.place_name.clone(),
            });
        } else {
            out.idles.push(IdleInterval {
                bike_id: curr.bike_id,
                place_name: curr.place_name.clone(),
                start_time: prev.timestamp,
                end_time: curr.timestamp,
                duration_hours: hours_between(prev.timestamp, curr.timestamp),
            });
        }
    }
    out
}
