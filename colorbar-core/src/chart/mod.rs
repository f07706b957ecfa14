//! Bucketed Chart Aggregation
//!
//! Every response the traffic client sees is reduced to an event
//! `(color, outcome)`. Events are dripped into the open bucket; when the
//! bucket's window elapses (or, under the capacity policy, when it is full)
//! it is sealed into an immutable [`Summary`] of per-color percentages and
//! appended to a bounded [`History`] that renderers read.
//!
//! ```text
//! event -> Bucket::drip -> Bucket::seal -> Summary -> History (FIFO, bounded) -> Renderer
//! ```

mod aggregator;
mod bucket;
mod history;
mod outcome;
mod shared;
mod summary;

#[cfg(test)]
mod tests;

pub use aggregator::{BucketedAggregator, DEFAULT_HISTORY_LEN, DEFAULT_WINDOW, SealPolicy};
pub use bucket::{Bucket, OutcomeCounts, UNKNOWN_COLOR};
pub use history::History;
pub use outcome::Outcome;
pub use shared::SharedAggregator;
pub use summary::{Summary, SummaryEntry};
