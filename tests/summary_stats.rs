use bikeshare_reports::group::value_counts;
use bikeshare_reports::stats::{format_seconds, least_n, max_by_first, mean, median, mode, top_n};

#[test]
fn mode_breaks_ties_by_first_occurrence() {
    let labels = ["b", "a", "a", "b", "c"];
    let counts = value_counts(&labels, |s| s.to_string());
    // Encounter order: b, a, c.
    assert_eq!(
        counts,
        vec![
            ("b".to_string(), 2),
            ("a".to_string(), 2),
            ("c".to_string(), 1)
        ]
    );
    let top = mode(&counts).unwrap();
    assert_eq!(top.label, "b");
    assert_eq!(top.count, 2);
}

#[test]
fn mode_of_empty_counts_is_none() {
    assert!(mode(&[]).is_none());
}

#[test]
fn mean_and_median_even_odd() {
    assert_eq!(mean(&[1, 2, 3, 4]), Some(2.5));
    assert_eq!(median(&[1, 2, 3, 4]), Some(2.5));
    assert_eq!(median(&[30, 10, 20]), Some(20.0));
    assert_eq!(mean(&[]), None);
    assert_eq!(median(&[]), None);
}

#[test]
fn max_by_first_keeps_the_earliest_maximum() {
    let items = [("x", 5), ("y", 9), ("z", 9)];
    let best = max_by_first(&items, |i| i.1).unwrap();
    assert_eq!(best.0, "y");
}

#[test]
fn durations_render_as_whole_seconds() {
    assert_eq!(format_seconds(0), "0:00:00");
    assert_eq!(format_seconds(61), "0:01:01");
    assert_eq!(format_seconds(3661), "1:01:01");
    assert_eq!(format_seconds(90061), "1 day, 1:01:01");
    assert_eq!(format_seconds(200_000), "2 days, 7:33:20");
    assert_eq!(format_seconds(-61), "-0:01:01");
}

#[test]
fn top_n_takes_the_head_of_the_ranking() {
    let ranking: Vec<u32> = (1..=25).rev().collect(); // 25, 24, ..., 1
    assert_eq!(top_n(&ranking, 20), (6..=25).rev().collect::<Vec<_>>());
    assert_eq!(top_n(&ranking, 30).len(), 25);
}

#[test]
fn least_n_uses_the_legacy_tail_slice() {
    // 25 entries ranked descending: the "least 20" list spans ranks 6-24,
    // dropping the single smallest entry. This matches the historical
    // report boundary; see DESIGN.md.
    let ranking: Vec<u32> = (1..=25).rev().collect();
    let least = least_n(&ranking, 20);
    assert_eq!(least.len(), 19);
    assert_eq!(least.first(), Some(&20)); // rank 6
    assert_eq!(least.last(), Some(&2)); // rank 24; rank 25 (value 1) dropped
}

#[test]
fn least_n_on_short_inputs() {
    let ranking = [5u32, 3, 1];
    assert_eq!(least_n(&ranking, 20), vec![5, 3]);
    assert_eq!(least_n(&ranking[..1], 20), Vec::<u32>::new());
    assert_eq!(least_n(&[] as &[u32], 20), Vec::<u32>::new());
}
