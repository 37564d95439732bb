use bikeshare_reports::models::{Trip, TripRecord};
use bikeshare_reports::station::{
    StationSummary, high_asymmetry, least_utilized, most_utilized, percent_variance,
    station_summaries, top_variance, trip_ranking, zero_activity,
};
use chrono::NaiveDateTime;

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn trip(from: &str, to: &str) -> Trip {
    Trip::from(TripRecord {
        start_time: ts("2017-01-02 08:00:00"),
        end_time: ts("2017-01-02 08:10:00"),
        start_station: from.into(),
        end_station: to.into(),
        duration_secs: 600,
        user_type: Some("Customer".into()),
        gender: None,
        birth_year: None,
    })
}

fn st(name: &str, starts: u64, ends: u64) -> StationSummary {
    let variance = starts as i64 - ends as i64;
    StationSummary {
        station: name.into(),
        starts,
        ends,
        variance,
        percent: percent_variance(starts, variance),
    }
}

#[test]
fn percentage_variance_and_zero_denominator_sentinel() {
    // starts=10, ends=4 -> variance 6, 60.0%
    assert_eq!(percent_variance(10, 6), 60.0);
    // starts=0 -> sentinel, rendered -100%
    assert_eq!(percent_variance(0, -5), -100.0);
    assert_eq!(percent_variance(3, 1), 33.3);
}

#[test]
fn outer_join_keeps_stations_seen_on_one_side_only() {
    let trips = vec![trip("A", "B"), trip("A", "C"), trip("B", "A")];
    let stations = station_summaries(&trips);

    // Alphabetical, and C appears despite having no starts.
    let names: Vec<&str> = stations.iter().map(|s| s.station.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);

    let a = &stations[0];
    assert_eq!((a.starts, a.ends, a.variance), (2, 1, 1));
    let c = &stations[2];
    assert_eq!((c.starts, c.ends), (0, 1));
    assert_eq!(c.percent, -100.0);

    let flagged = zero_activity(&stations);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].station, "C");
}

#[test]
fn high_asymmetry_excludes_the_hundred_percent_cases() {
    let stations = vec![
        st("balanced", 10, 10), // 0%
        st("skewed", 10, 4),    // 60%
        st("one-sided", 10, 0), // 100%, already in the zero-activity list
        st("inflow", 4, 10),    // -150%
    ];
    let names: Vec<String> = high_asymmetry(&stations)
        .into_iter()
        .map(|s| s.station)
        .collect();
    assert_eq!(names, ["skewed", "inflow"]);
}

#[test]
fn utilization_rankings_and_the_legacy_bottom_slice() {
    // 25 stations with strictly decreasing total activity.
    let stations: Vec<StationSummary> = (1..=25)
        .map(|i| st(&format!("S{i:02}"), (26 - i) * 10, 0))
        .collect();

    let top = most_utilized(&stations, 20);
    assert_eq!(top.len(), 20);
    assert_eq!(top[0].station, "S01");
    assert_eq!(top[19].station, "S20");

    // Ranks 6-24: the single least-active station (S25) is dropped.
    let bottom = least_utilized(&stations, 20);
    assert_eq!(bottom.len(), 19);
    assert_eq!(bottom[0].station, "S06");
    assert_eq!(bottom[18].station, "S24");
}

#[test]
fn variance_ranking_uses_absolute_values() {
    let stations = vec![st("a", 10, 10), st("b", 2, 30), st("c", 20, 5)];
    let ranked = top_variance(&stations, 2);
    assert_eq!(ranked[0].station, "b"); // |−28|
    assert_eq!(ranked[1].station, "c"); // |15|
}

#[test]
fn trip_ranking_counts_start_to_end_labels() {
    let trips = vec![trip("A", "B"), trip("A", "B"), trip("B", "A")];
    let ranked = trip_ranking(&trips);
    assert_eq!(ranked[0], ("A to B".to_string(), 2));
    assert_eq!(ranked[1], ("B to A".to_string(), 1));
}
