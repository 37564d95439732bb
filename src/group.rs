//! Exact grouped counting. Every item contributes to exactly one key tuple,
//! so the sum of all counts equals the number of input items.

use std::collections::HashMap;

/// An ordered tuple of one to three category labels.
pub type GroupKey = Vec<String>;

/// Counts per key tuple.
pub type Counts = HashMap<GroupKey, u64>;

/// Count items per key tuple produced by `selector`.
pub fn count_by<T, F>(items: &[T], selector: F) -> Counts
where
    F: Fn(&T) -> GroupKey,
{
    let mut counts = Counts::new();
    for item in items {
        *counts.entry(selector(item)).or_insert(0) += 1;
    }
    counts
}

/// Count items per single label, preserving first-encounter order. The order
/// is the tie-break for [`crate::stats::mode`], so it must be stable.
pub fn value_counts<T, F>(items: &[T], selector: F) -> Vec<(String, u64)>
where
    F: Fn(&T) -> String,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<(String, u64)> = Vec::new();
    for item in items {
        let label = selector(item);
        match index.get(&label) {
            Some(&i) => out[i].1 += 1,
            None => {
                index.insert(label.clone(), out.len());
                out.push((label, 1));
            }
        }
    }
    out
}
