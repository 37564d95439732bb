//! Scalar summary statistics over category counts and raw numeric columns.

use serde::{Deserialize, Serialize};

/// A "most popular X" style call-out: the winning label and its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub label: String,
    pub count: u64,
}

/// Argmax by count over encounter-ordered counts. Ties resolve to the label
/// seen first in the input, which reproduces the historical report output.
pub fn mode(counts: &[(String, u64)]) -> Option<Highlight> {
    let mut best: Option<&(String, u64)> = None;
    for entry in counts {
        if best.is_none_or(|b| entry.1 > b.1) {
            best = Some(entry);
        }
    }
    best.map(|(label, count)| Highlight {
        label: label.clone(),
        count: *count,
    })
}

pub fn mean(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<i64>() as f64 / values.len() as f64)
}

pub fn median(values: &[i64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2] as f64)
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0)
    }
}

/// First item with the maximum key. `Iterator::max_by_key` keeps the last
/// maximum, so ties are resolved by hand to match first-occurrence reporting.
pub fn max_by_first<T, K, F>(items: &[T], key: F) -> Option<&T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut best: Option<(&T, K)> = None;
    for item in items {
        let k = key(item);
        if best.as_ref().is_none_or(|(_, bk)| k > *bk) {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}

/// Render a second count the way the reports do: whole seconds, as
/// `h:mm:ss`, with a day count prefix once it exceeds 24 hours.
pub fn format_seconds(secs: i64) -> String {
    let (sign, secs) = if secs < 0 { ("-", -secs) } else { ("", secs) };
    let days = secs / 86_400;
    let rem = secs % 86_400;
    let (h, m, s) = (rem / 3600, (rem % 3600) / 60, rem % 60);
    if days == 1 {
        format!("{sign}{days} day, {h}:{m:02}:{s:02}")
    } else if days > 1 {
        format!("{sign}{days} days, {h}:{m:02}:{s:02}")
    } else {
        format!("{sign}{h}:{m:02}:{s:02}")
    }
}

/// First `n` entries of an already descending-sorted ranking.
pub fn top_n<T: Clone>(sorted_desc: &[T], n: usize) -> Vec<T> {
    sorted_desc.iter().take(n).cloned().collect()
}

/// The "least N" tail of a descending ranking, sliced as the historical
/// reports did: the last `n` entries *excluding* the final (smallest) one.
/// With 25 ranked entries and n = 20 this yields ranks 6-24. Preserved for
/// output parity; see DESIGN.md.
pub fn least_n<T: Clone>(sorted_desc: &[T], n: usize) -> Vec<T> {
    if sorted_desc.is_empty() {
        return Vec::new();
    }
    let end = sorted_desc.len() - 1;
    let start = sorted_desc.len().saturating_sub(n).min(end);
    sorted_desc[start..end].to_vec()
}
