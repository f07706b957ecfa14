use crate::chart::summary::Summary;
use std::collections::VecDeque;

/// Bounded, chronological ring of sealed summaries (oldest first).
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Summary>,
    capacity: usize,
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Append a summary, evicting from the front once over capacity.
    ///
    /// Returns how many summaries were evicted.
    pub fn push(&mut self, summary: Summary) -> usize {
        self.entries.push_back(summary);
        self.evict()
    }

    /// Change the eviction threshold. Shrinking drops the oldest entries,
    /// growing never backfills.
    pub fn resize(&mut self, capacity: usize) -> usize {
        self.capacity = capacity.max(1);
        self.evict()
    }

    fn evict(&mut self) -> usize {
        let mut evicted = 0;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            evicted += 1;
        }
        evicted
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Summary> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&Summary> {
        self.entries.back()
    }

    /// Sequence number of the newest summary, or 0 if nothing was sealed yet.
    pub fn last_sequence(&self) -> u64 {
        self.latest().map(|s| s.sequence).unwrap_or(0)
    }

    /// Summaries sealed after `sequence`, oldest first.
    pub fn newer_than(&self, sequence: u64) -> impl Iterator<Item = &Summary> {
        self.entries.iter().filter(move |s| s.sequence > sequence)
    }

    /// The most recent `n` summaries, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &Summary> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip)
    }
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(crate::chart::DEFAULT_HISTORY_LEN)
    }
}
