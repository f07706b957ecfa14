//! `colorbar watch`: poll the backend, bucket the answers, draw the chart.
//!
//! Two periodic tasks feed one [`SharedAggregator`](crate::chart::SharedAggregator):
//!
//! * poll: one request per period, bounded by `client.max_in_flight`
//! * tick: feeds the measured elapsed time to the aggregator
//!
//! The calling task renders the published history on its own interval and
//! resizes the history whenever the renderer's capacity changes.

mod run;

pub use run::{WatchOptions, WatchStats, build_aggregator, run_watch, sync_capacity};
