//! Per-station activity summaries and the flagged subsets derived from them.
//!
//! The station list is the outer join of the stations appearing as trip
//! starts with those appearing as trip ends: a station used only on one side
//! still appears, with the other count at zero.

use crate::models::Trip;
use crate::stats::{least_n, top_n};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Start/end activity at one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSummary {
    pub station: String,
    pub starts: u64,
    pub ends: u64,
    /// Signed difference, starts minus ends.
    pub variance: i64,
    /// Variance as a percentage of starts, rounded to one decimal;
    /// -100.0 when the station has no starts.
    pub percent: f64,
}

/// Percentage variance relative to starts. A station with no starts yields
/// the -100% sentinel rather than NaN or an omitted row.
pub fn percent_variance(starts: u64, variance: i64) -> f64 {
    if starts == 0 {
        return -100.0;
    }
    // Matches the report's rounding: ratio to three decimals, then x100.
    (variance as f64 / starts as f64 * 1000.0).round() / 10.0
}

/// Build the joined station list, ordered alphabetically by station name.
pub fn station_summaries(trips: &[Trip]) -> Vec<StationSummary> {
    let mut starts: BTreeMap<&str, u64> = BTreeMap::new();
    let mut ends: BTreeMap<&str, u64> = BTreeMap::new();
    for t in trips {
        *starts.entry(&t.record.start_station).or_insert(0) += 1;
        *ends.entry(&t.record.end_station).or_insert(0) += 1;
    }

    let mut names: BTreeMap<&str, ()> = BTreeMap::new();
    names.extend(starts.keys().map(|k| (*k, ())));
    names.extend(ends.keys().map(|k| (*k, ())));

    names
        .into_keys()
        .map(|name| {
            let s = starts.get(name).copied().unwrap_or(0);
            let e = ends.get(name).copied().unwrap_or(0);
            let variance = s as i64 - e as i64;
            StationSummary {
                station: name.to_string(),
                starts: s,
                ends: e,
                variance,
                percent: percent_variance(s, variance),
            }
        })
        .collect()
}

/// Stations with trip starts but no ends, or vice versa.
pub fn zero_activity(stations: &[StationSummary]) -> Vec<StationSummary> {
    stations
        .iter()
        .filter(|s| s.starts == 0 || s.ends == 0)
        .cloned()
        .collect()
}

/// Stations whose starts/ends differ by more than 50% of starts but less
/// than 100% (the 100% cases are already in the zero-activity list).
pub fn high_asymmetry(stations: &[StationSummary]) -> Vec<StationSummary> {
    stations
        .iter()
        .filter(|s| s.percent.abs() > 50.0 && s.percent.abs() < 100.0)
        .cloned()
        .collect()
}

fn by_total_desc(stations: &[StationSummary]) -> Vec<StationSummary> {
    let mut sorted = stations.to_vec();
    sorted.sort_by(|a, b| (b.starts + b.ends).cmp(&(a.starts + a.ends)));
    sorted
}

/// The `n` stations with the most combined starts and ends.
pub fn most_utilized(stations: &[StationSummary], n: usize) -> Vec<StationSummary> {
    top_n(&by_total_desc(stations), n)
}

/// The "least utilized" list, using the legacy tail slice of the descending
/// ranking (drops the single least-active station; see `stats::least_n`).
pub fn least_utilized(stations: &[StationSummary], n: usize) -> Vec<StationSummary> {
    least_n(&by_total_desc(stations), n)
}

/// The `n` stations with the largest absolute difference between starts and
/// ends.
pub fn top_variance(stations: &[StationSummary], n: usize) -> Vec<StationSummary> {
    let mut sorted = stations.to_vec();
    sorted.sort_by(|a, b| b.variance.abs().cmp(&a.variance.abs()));
    top_n(&sorted, n)
}

/// Trip labels ("<start> to <end>") ranked by count, descending, preserving
/// first-encounter order among equal counts.
pub fn trip_ranking(trips: &[Trip]) -> Vec<(String, u64)> {
    let mut counts = crate::group::value_counts(trips, |t| t.trip_label.clone());
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
