use crate::chart::aggregator::BucketedAggregator;
use crate::chart::history::History;
use crate::chart::outcome::Outcome;
use crate::chart::summary::Summary;
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Thread-safe handle around a [`BucketedAggregator`].
///
/// Writers serialize on one mutex (a drip and the seal it may trigger are a
/// single step). Readers never touch that mutex: the history is republished
/// through an `ArcSwap` after every seal or resize.
#[derive(Debug)]
pub struct SharedAggregator {
    inner: Mutex<BucketedAggregator>,
    published: ArcSwap<History>,
}

impl SharedAggregator {
    pub fn new(aggregator: BucketedAggregator) -> Self {
        let published = ArcSwap::from_pointee(aggregator.history().clone());
        Self {
            inner: Mutex::new(aggregator),
            published,
        }
    }

    pub fn record(&self, color: &str, outcome: Outcome) {
        let _ = self.drip(color, outcome);
    }

    pub fn drip(&self, color: &str, outcome: Outcome) -> Option<Summary> {
        let mut agg = self.lock();
        let sealed = agg.drip(color, outcome);
        if sealed.is_some() {
            self.publish(&agg);
        }
        sealed
    }

    /// Returns `true` when a new summary was sealed.
    pub fn advance(&self, elapsed: Duration) -> bool {
        let mut agg = self.lock();
        let sealed = agg.advance(elapsed).is_some();
        if sealed {
            self.publish(&agg);
        }
        sealed
    }

    pub fn flush(&self) -> bool {
        let mut agg = self.lock();
        let sealed = agg.flush().is_some();
        if sealed {
            self.publish(&agg);
        }
        sealed
    }

    pub fn resize(&self, capacity: usize) -> usize {
        let mut agg = self.lock();
        let dropped = agg.resize(capacity);
        self.publish(&agg);
        dropped
    }

    /// Latest published history. Lock-free.
    pub fn history(&self) -> Arc<History> {
        self.published.load_full()
    }

    /// Events counted in the open bucket so far.
    pub fn pending(&self) -> u64 {
        self.lock().current_bucket().total()
    }

    fn lock(&self) -> MutexGuard<'_, BucketedAggregator> {
        // A panic mid-drip leaves at worst one miscounted event.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, agg: &BucketedAggregator) {
        self.published.store(Arc::new(agg.history().clone()));
    }
}

impl Default for SharedAggregator {
    fn default() -> Self {
        Self::new(BucketedAggregator::default())
    }
}
