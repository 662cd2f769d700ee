use std::collections::HashSet;

use crate::types::Entry;

/// Collapse repeated (title, url) pairs, keeping the first occurrence and
/// its position. The directory repeats popular links across sections, so
/// a raw extraction usually carries duplicates.
pub fn dedupe(entries: Vec<Entry>) -> Vec<Entry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|entry| seen.insert((entry.title.clone(), entry.url.clone())))
        .collect()
}
