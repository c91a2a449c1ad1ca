pub mod geo;
pub mod stats;

pub use geo::*;
pub use stats::*;
