use std::{collections::HashMap, ops::Range, time::Instant};

use tracing::debug;

use crate::feed::{self, FeedReader, Ping};

pub mod events;
mod models;
pub use models::*;

/// Frozen, indexed store for one batch of validated pings: a single
/// globally sorted arena plus one contiguous slot per bike. Grouping a
/// bike's pings is an index range into the arena, not a per-bike
/// allocation.
#[derive(Debug, Default, Clone)]
pub struct Fleet {
    pings: Box<[Ping]>,
    slots: Box<[Range<usize>]>,
    bike_lookup: HashMap<u64, usize>,
}

impl Fleet {
    pub fn new() -> Self {
        Default::default()
    }

    /// Streams a feed into the arena. Depending on the size of the feed
    /// this can be a long blocking call.
    pub fn load_feed(self, feed: FeedReader) -> Result<Self, feed::Error> {
        debug!("Loading feed...");
        let now = Instant::now();
        let mut pings: Vec<Ping> = Vec::new();
        feed.stream_pings(|(_, ping)| pings.push(ping))?;
        debug!("Loading {} pings took {:?}", pings.len(), now.elapsed());
        Ok(self.from_pings(pings))
    }

    /// Builds the arena from already validated pings.
    pub fn from_pings(mut self, mut pings: Vec<Ping>) -> Self {
        debug!("Indexing timelines...");
        let now = Instant::now();

        // Stable sort: pings with equal timestamps keep their input order.
        pings.sort_by(|a, b| {
            a.bike_id
                .cmp(&b.bike_id)
                .then(a.timestamp.cmp(&b.timestamp))
        });

        let mut slots: Vec<Range<usize>> = Vec::new();
        let mut bike_lookup: HashMap<u64, usize> = HashMap::new();
        let mut start = 0;
        for i in 0..pings.len() {
            let bike_ends_here = match pings.get(i + 1) {
                Some(next) => next.bike_id != pings[i].bike_id,
                None => true,
            };
            if bike_ends_here {
                bike_lookup.insert(pings[i].bike_id, slots.len());
                slots.push(start..i + 1);
                start = i + 1;
            }
        }

        self.pings = pings.into();
        self.slots = slots.into();
        self.bike_lookup = bike_lookup;
        debug!(
            "Indexing {} pings into {} timelines took {:?}",
            self.pings.len(),
            self.slots.len(),
            now.elapsed()
        );
        self
    }

    /// Total ping count. Conserved across all timelines: every ping
    /// belongs to exactly one slot.
    pub fn len(&self) -> usize {
        self.pings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pings.is_empty()
    }

    pub fn bike_count(&self) -> usize {
        self.slots.len()
    }

    pub fn pings(&self) -> &[Ping] {
        &self.pings
    }

    pub fn timeline(&self, bike_id: u64) -> Option<Timeline<'_>> {
        let slot = self.bike_lookup.get(&bike_id)?;
        Some(self.timeline_at(*slot))
    }

    /// Iterates timelines in ascending bike id order.
    pub fn timelines(&self) -> impl Iterator<Item = Timeline<'_>> {
        (0..self.slots.len()).map(|slot| self.timeline_at(slot))
    }

    fn timeline_at(&self, slot: usize) -> Timeline<'_> {
        let pings = &self.pings[self.slots[slot].clone()];
        Timeline {
            bike_id: pings[0].bike_id,
            pings,
        }
    }
}
