use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, trace};

pub struct PeriodicTask;

impl PeriodicTask {
    /// Run `f` every `period` until the returned handle is stopped.
    ///
    /// `f` receives the time actually elapsed since its previous run (zero
    /// on the first run). Runs never overlap; ticks missed while `f` was
    /// busy are skipped rather than replayed in a burst.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut f: F) -> TaskHandle
    where
        F: FnMut(Duration) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let period = period.max(Duration::from_millis(1));

        let join = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut last: Option<Instant> = None;

            debug!(event = "task_started", task = name, period_ms = period.as_millis() as u64);

            loop {
                tokio::select! {
                    biased;
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        let now = Instant::now();
                        let elapsed = last.map_or(Duration::ZERO, |prev| now - prev);
                        last = Some(now);
                        trace!(event = "task_tick", task = name, elapsed_us = elapsed.as_micros() as u64);
                        f(elapsed).await;
                    }
                }
            }

            debug!(event = "task_stopped", task = name);
        });

        TaskHandle {
            name,
            stop: stop_tx,
            join,
        }
    }
}

/// Handle to a [`PeriodicTask`]. Dropping it stops the task too.
pub struct TaskHandle {
    name: &'static str,
    stop: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl TaskHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ask the task to stop. A run already in progress completes first.
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Stop the task and wait for it to exit.
    pub async fn join(self) -> Result<(), JoinError> {
        self.stop();
        self.join.await
    }
}
