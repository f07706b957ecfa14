use crate::chart::{BucketedAggregator, History, SharedAggregator};
use crate::client::{ColorClient, ColorControls};
use crate::conf::ColorbarConfig;
use crate::render::Renderer;
use crate::schedule::PeriodicTask;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info, trace};

pub struct WatchOptions {
    /// Stop after this long; run until ctrl-c otherwise.
    pub duration: Option<Duration>,
}

/// Poll counters for one watch session.
#[derive(Debug, Default)]
pub struct WatchStats {
    pub polls_ok: AtomicU64,
    pub polls_failed: AtomicU64,
    pub polls_skipped: AtomicU64,
}

impl WatchStats {
    pub fn ok(&self) -> u64 {
        self.polls_ok.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.polls_failed.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> u64 {
        self.polls_skipped.load(Ordering::Relaxed)
    }
}

pub fn build_aggregator(config: &ColorbarConfig) -> SharedAggregator {
    let policy = config.chart.seal_policy(config.client.poll_interval());
    SharedAggregator::new(BucketedAggregator::new(policy, config.chart.history_len))
}

/// Resize the history when the renderer's capacity differs from what was
/// last applied. Returns the capacity now in effect.
pub fn sync_capacity(
    aggregator: &SharedAggregator,
    renderer: &dyn Renderer,
    applied: Option<usize>,
) -> Option<usize> {
    let wanted = renderer.capacity();
    if wanted != applied
        && let Some(capacity) = wanted
    {
        let dropped = aggregator.resize(capacity);
        debug!(event = "renderer_capacity_changed", capacity, dropped);
    }
    wanted.or(applied)
}

/// Run the dashboard until ctrl-c or `options.duration`. Every frame is
/// handed to `sink`. Returns the final history after flushing the open bucket.
pub async fn run_watch<S>(
    config: &ColorbarConfig,
    mut renderer: Box<dyn Renderer>,
    mut sink: S,
    options: WatchOptions,
) -> Result<(Arc<History>, Arc<WatchStats>)>
where
    S: FnMut(&str) + Send + 'static,
{
    let client_cfg = &config.client;
    let controls = Arc::new(ColorControls::from_config(&client_cfg.controls));
    let client = ColorClient::new(client_cfg, controls).context("failed to build http client")?;

    let aggregator = Arc::new(build_aggregator(config));
    let stats = Arc::new(WatchStats::default());
    let max_in_flight = client_cfg.max_in_flight.max(1);
    let permits = Arc::new(Semaphore::new(max_in_flight));

    let mut applied = sync_capacity(&aggregator, renderer.as_ref(), None);

    info!(
        event = "watch_started",
        target = %client.target(),
        poll_interval_ms = client_cfg.poll_interval_ms,
        tick_interval_ms = client_cfg.tick_interval_ms,
        max_in_flight,
    );

    //--------------------------------------------------------------------------
    // Poll
    //--------------------------------------------------------------------------
    let poll = PeriodicTask::spawn("poll", client_cfg.poll_interval(), {
        let aggregator = aggregator.clone();
        let stats = stats.clone();
        let permits = permits.clone();
        move |_| {
            let permit = permits.clone().try_acquire_owned();
            let client = client.clone();
            let aggregator = aggregator.clone();
            let stats = stats.clone();
            async move {
                let Ok(permit) = permit else {
                    stats.polls_skipped.fetch_add(1, Ordering::Relaxed);
                    trace!(event = "poll_skipped");
                    return;
                };
                tokio::spawn(async move {
                    let _permit = permit;
                    match client.poll().await {
                        Ok(event) => {
                            stats.polls_ok.fetch_add(1, Ordering::Relaxed);
                            aggregator.record(&event.color, event.outcome);
                        }
                        Err(e) => {
                            stats.polls_failed.fetch_add(1, Ordering::Relaxed);
                            debug!(event = "poll_failed", error = %e);
                        }
                    }
                });
            }
        }
    });

    //--------------------------------------------------------------------------
    // Tick
    //--------------------------------------------------------------------------
    let tick = PeriodicTask::spawn("tick", client_cfg.tick_interval(), {
        let aggregator = aggregator.clone();
        move |elapsed| {
            aggregator.advance(elapsed);
            async {}
        }
    });

    //--------------------------------------------------------------------------
    // Wait
    //--------------------------------------------------------------------------
    let deadline = async {
        match options.duration {
            Some(d) => tokio::time::sleep(d).await,
            None => std::future::pending().await,
        }
    };

    let mut frames = tokio::time::interval(client_cfg.render_interval());
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => {
                info!(event = "watch_interrupted");
                break;
            }
            _ = frames.tick() => {
                applied = sync_capacity(&aggregator, renderer.as_ref(), applied);
                let frame = renderer.render(&aggregator.history());
                if !frame.is_empty() {
                    sink(&frame);
                }
            }
        }
    }

    //--------------------------------------------------------------------------
    // Drain
    //--------------------------------------------------------------------------
    poll.join().await.context("poll task panicked")?;
    tick.join().await.context("tick task panicked")?;

    let _ = tokio::time::timeout(
        client_cfg.request_timeout(),
        permits.acquire_many(max_in_flight as u32),
    )
    .await;

    aggregator.flush();
    let history = aggregator.history();
    let frame = renderer.render(&history);
    if !frame.is_empty() {
        sink(&frame);
    }

    info!(
        event = "watch_stopped",
        polls_ok = stats.ok(),
        polls_failed = stats.failed(),
        polls_skipped = stats.skipped(),
        summaries = history.last_sequence(),
    );

    Ok((history, stats))
}
