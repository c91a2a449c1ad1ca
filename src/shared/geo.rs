use std::{fmt::Display, iter::Sum};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}, {}", self.latitude, self.longitude))
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from(value: (f64, f64)) -> Self {
        Self {
            latitude: value.0,
            longitude: value.1,
        }
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(value: Coordinate) -> Self {
        (value.latitude, value.longitude)
    }
}

impl Sum for Coordinate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        let mut count: usize = 0;
        let mut lat: f64 = 0.0;
        let mut lon: f64 = 0.0;
        iter.for_each(|coordinate| {
            count += 1;
            lat += coordinate.latitude;
            lon += coordinate.longitude;
        });
        let count = count as f64;
        Self {
            latitude: lat / count,
            longitude: lon / count,
        }
    }
}

#[test]
fn coordinate_eq_test() {
    let coord_a = Coordinate::from((47.66, 9.17));
    let coord_b = Coordinate::from((47.66, 9.17));
    let coord_c = Coordinate::from((47.66, 9.18));
    assert_eq!(coord_a, coord_b);
    assert_ne!(coord_a, coord_c);
}

#[test]
fn coordinate_sum_test() {
    let mean: Coordinate = [Coordinate::from((47.0, 9.0)), Coordinate::from((48.0, 10.0))]
        .into_iter()
        .sum();
    assert_eq!(mean, Coordinate::from((47.5, 9.5)));
}
