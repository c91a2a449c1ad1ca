use crate::{feed::Ping, fleet::events};

/// A bike's pings in ascending timestamp order, borrowing into the
/// fleet's sorted arena. Never empty: a bike without pings has no slot.
#[derive(Debug, Clone, Copy)]
pub struct Timeline<'a> {
    pub bike_id: u64,
    pub pings: &'a [Ping],
}

impl Timeline<'_> {
    pub fn len(&self) -> usize {
        self.pings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pings.is_empty()
    }

    pub fn first(&self) -> &Ping {
        &self.pings[0]
    }

    pub fn last(&self) -> &Ping {
        &self.pings[self.pings.len() - 1]
    }

    /// Elapsed hours between the first and last observed ping.
    pub fn span_hours(&self) -> f64 {
        events::hours_between(self.first().timestamp, self.last().timestamp)
    }
}
