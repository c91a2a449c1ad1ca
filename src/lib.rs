pub mod feed;
pub mod fleet;
pub mod metrics;
pub mod shared;

pub mod prelude {
    pub use crate::{
        feed::{BikeType, FeedReader, Ping},
        fleet::{
            Fleet, Timeline,
            events::{Derivation, IdleInterval, LocationPolicy, MovementEvent, derive},
        },
        metrics::{Config, Report, analyze},
        shared::Coordinate,
    };
}
