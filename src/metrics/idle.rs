use std::{collections::HashMap, sync::Arc};

use crate::{fleet::events::IdleInterval, shared::stats};

/// Global idle-duration statistics. `None` means the interval set was
/// empty; an undefined statistic is never reported as zero, since that
/// would misrepresent "no data" as "no idle time".
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct IdleSummary {
    pub mean_hours: Option<f64>,
    pub median_hours: Option<f64>,
    pub max_hours: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct StationIdleStat {
    pub place_name: Arc<str>,
    pub mean_idle_hours: f64,
    pub sample_count: usize,
}

pub fn summarize(idles: &[IdleInterval]) -> IdleSummary {
    let durations: Vec<f64> = idles.iter().map(|idle| idle.duration_hours).collect();
    IdleSummary {
        mean_hours: stats::mean(&durations),
        median_hours: stats::median(&durations),
        max_hours: stats::max(&durations),
    }
}

/// Top `n` stations by mean idle duration, longest first, ties broken
/// by station name. A station only gets a row if it has at least one
/// interval, so every reported mean is backed by samples.
pub fn top_stations(idles: &[IdleInterval], n: usize) -> Vec<StationIdleStat> {
    // Means come from merged (sum, count) pairs, never means of means.
    let mut series: HashMap<Arc<str>, (f64, usize)> = HashMap::new();
    for idle in idles {
        let entry = series.entry(idle.place_name.clone()).or_default();
        entry.0 += idle.duration_hours;
        entry.1 += 1;
    }

    let mut rows: Vec<StationIdleStat> = series
        .into_iter()
        .map(|(place_name, (sum, count))| StationIdleStat {
            place_name,
            mean_idle_hours: sum / count as f64,
            sample_count: count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.mean_idle_hours
            .total_cmp(&a.mean_idle_hours)
            .then_with(|| a.place_name.cmp(&b.place_name))
    });
    rows.truncate(n);
    rows
}
