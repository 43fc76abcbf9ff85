//! Measurement-outcome histogram.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Bitstring → occurrence count.
///
/// Keys are classical-register bitstrings, highest classical bit first.
/// Only outcomes that occurred at least once are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`. Zero counts are ignored.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of `bitstring` (0 if never observed).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Check whether `bitstring` was observed.
    pub fn contains(&self, bitstring: &str) -> bool {
        self.counts.contains_key(bitstring)
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(bitstring, count)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.counts.iter()
    }

    /// Outcomes by descending count; ties ordered by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.sorted().into_iter().next()
    }

    /// Relative frequency of `bitstring`.
    pub fn probability(&self, bitstring: &str) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / total as f64
    }
}

impl<'a> IntoIterator for &'a Counts {
    type Item = (&'a String, &'a u64);
    type IntoIter = std::collections::hash_map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
