use crate::chart::bucket::Bucket;
use crate::chart::history::History;
use crate::chart::outcome::Outcome;
use crate::chart::summary::Summary;
use std::mem;
use std::time::Duration;
use tracing::{debug, trace};

pub const DEFAULT_WINDOW: Duration = Duration::from_secs(3);
pub const DEFAULT_HISTORY_LEN: usize = 600;

/// When the open bucket is sealed.
///
/// An aggregator is built with exactly one policy and keeps it for life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealPolicy {
    /// Seal once the accumulated elapsed time exceeds the window.
    Window(Duration),

    /// Seal as soon as the bucket holds this many events.
    Capacity(u64),
}

impl SealPolicy {
    /// Capacity matching the expected event count of one window at a fixed poll rate.
    pub fn capacity_for(window: Duration, poll_interval: Duration) -> Self {
        let poll_ms = poll_interval.as_millis().max(1);
        let events = (window.as_millis() / poll_ms).max(1);
        SealPolicy::Capacity(u64::try_from(events).unwrap_or(u64::MAX))
    }
}

impl Default for SealPolicy {
    fn default() -> Self {
        SealPolicy::Window(DEFAULT_WINDOW)
    }
}

/// Turns an unbounded stream of `(color, outcome)` events into a bounded
/// history of per-window percentage summaries.
#[derive(Debug)]
pub struct BucketedAggregator {
    policy: SealPolicy,
    bucket: Bucket,
    since_last_seal: Duration,
    history: History,
    sealed: u64,
}

impl BucketedAggregator {
    pub fn new(policy: SealPolicy, history_len: usize) -> Self {
        Self {
            policy,
            bucket: Bucket::new(),
            since_last_seal: Duration::ZERO,
            history: History::with_capacity(history_len),
            sealed: 0,
        }
    }

    pub fn policy(&self) -> SealPolicy {
        self.policy
    }

    /// Count one event against the open bucket.
    pub fn record(&mut self, color: &str, outcome: Outcome) {
        let _ = self.drip(color, outcome);
    }

    /// Count one event and, under the capacity policy, seal the bucket once
    /// it is full. The sealed summary is returned and also kept in history.
    pub fn drip(&mut self, color: &str, outcome: Outcome) -> Option<Summary> {
        self.bucket.drip(color, outcome);

        match self.policy {
            SealPolicy::Capacity(capacity) if self.bucket.total() >= capacity.max(1) => {
                self.seal_current().cloned()
            }
            _ => None,
        }
    }

    /// Feed wall-clock time into the window timer.
    ///
    /// Returns the new summary when the window elapsed and the bucket was not
    /// empty. Does nothing under the capacity policy.
    pub fn advance(&mut self, elapsed: Duration) -> Option<&Summary> {
        let SealPolicy::Window(window) = self.policy else {
            return None;
        };

        self.since_last_seal = self.since_last_seal.saturating_add(elapsed);
        if self.since_last_seal <= window {
            return None;
        }

        self.since_last_seal = Duration::ZERO;
        self.seal_current()
    }

    /// `advance` for callers measuring time as float seconds.
    /// Negative, NaN and infinite values count as no time at all.
    pub fn advance_secs(&mut self, elapsed_secs: f64) -> Option<&Summary> {
        self.advance(clamp_elapsed(elapsed_secs))
    }

    /// Seal whatever the open bucket holds, regardless of policy.
    pub fn flush(&mut self) -> Option<&Summary> {
        self.since_last_seal = Duration::ZERO;
        self.seal_current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn resize(&mut self, capacity: usize) -> usize {
        let dropped = self.history.resize(capacity);
        if dropped > 0 {
            debug!(
                event = "history_resized",
                capacity = self.history.capacity(),
                dropped
            );
        }
        dropped
    }

    pub fn current_bucket(&self) -> &Bucket {
        &self.bucket
    }

    fn seal_current(&mut self) -> Option<&Summary> {
        let bucket = mem::take(&mut self.bucket);
        let window_age = bucket.started_at().elapsed();

        let Some(summary) = bucket.seal(self.sealed + 1) else {
            trace!(event = "bucket_discarded", reason = "empty");
            return None;
        };

        self.sealed = summary.sequence;
        debug!(
            event = "bucket_sealed",
            sequence = summary.sequence,
            total = summary.total,
            colors = summary.entries.len(),
            window_ms = window_age.as_millis() as u64
        );

        self.history.push(summary);
        self.history.latest()
    }
}

impl Default for BucketedAggregator {
    fn default() -> Self {
        Self::new(SealPolicy::default(), DEFAULT_HISTORY_LEN)
    }
}

fn clamp_elapsed(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}
