use crate::chart::outcome::Outcome;
use crate::chart::summary::{Summary, SummaryEntry};
use std::collections::BTreeMap;
use std::time::Instant;

/// Category used for events that arrive without a color.
pub const UNKNOWN_COLOR: &str = "unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub ok: u64,
    pub error: u64,
}

impl OutcomeCounts {
    pub fn total(&self) -> u64 {
        self.ok + self.error
    }
}

/// Mutable accumulator for the window that is currently open.
///
/// Colors are kept in a `BTreeMap` so sealing walks them in ascending order.
#[derive(Debug, Clone)]
pub struct Bucket {
    started_at: Instant,
    counts: BTreeMap<String, OutcomeCounts>,
    total: u64,
}

impl Bucket {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            counts: BTreeMap::new(),
            total: 0,
        }
    }

    pub fn drip(&mut self, color: &str, outcome: Outcome) {
        let counts = self.counts.entry(normalize_color(color)).or_default();

        match outcome {
            Outcome::Ok => counts.ok += 1,
            Outcome::Error => counts.error += 1,
        }

        self.total += 1;
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn counts(&self) -> &BTreeMap<String, OutcomeCounts> {
        &self.counts
    }

    /// Consume the bucket. Empty buckets produce nothing.
    pub(crate) fn seal(self, sequence: u64) -> Option<Summary> {
        if self.total == 0 {
            return None;
        }

        let total = self.total as f64;
        let entries = self
            .counts
            .into_iter()
            .map(|(color, counts)| SummaryEntry {
                color,
                percentage_of_total: counts.total() as f64 / total,
                percentage_ok: counts.ok as f64 / total,
                percentage_error: counts.error as f64 / total,
            })
            .collect();

        Some(Summary {
            sequence,
            total: self.total,
            entries,
        })
    }
}

impl Default for Bucket {
    fn default() -> Self {
        Self::new()
    }
}

/// Any non-empty key is its own category, whitespace included.
fn normalize_color(color: &str) -> String {
    if color.is_empty() {
        UNKNOWN_COLOR.to_string()
    } else {
        color.to_string()
    }
}
