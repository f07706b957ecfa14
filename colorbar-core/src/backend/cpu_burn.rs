use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tracing::info;

/// How many CPUs `--cpu-burn` keeps busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuBurn {
    All,
    Count(usize),
}

impl CpuBurn {
    /// `"all"` or a positive integer.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        match value.parse::<usize>() {
            Ok(n) if n > 0 => Some(Self::Count(n)),
            _ => None,
        }
    }

    pub fn threads(&self) -> usize {
        match self {
            Self::All => thread::available_parallelism().map_or(1, |n| n.get()),
            Self::Count(n) => *n,
        }
    }
}

/// Busy-looping threads that run until [`CpuBurner::stop`] or drop.
pub struct CpuBurner {
    stop: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl CpuBurner {
    pub fn start(burn: CpuBurn) -> std::io::Result<Self> {
        let count = burn.threads();
        info!(event = "cpu_burn_started", cpus = count);

        let stop = Arc::new(AtomicBool::new(false));
        let mut handles = Vec::with_capacity(count);
        for cpu in 0..count {
            let stop = stop.clone();
            let handle = thread::Builder::new()
                .name(format!("cpu-burn-{cpu}"))
                .spawn(move || {
                    while !stop.load(Ordering::Relaxed) {
                        std::hint::spin_loop();
                    }
                })?;
            handles.push(handle);
        }

        Ok(Self { stop, handles })
    }

    pub fn threads(&self) -> usize {
        self.handles.len()
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
        info!(event = "cpu_burn_stopped");
    }
}

impl Drop for CpuBurner {
    fn drop(&mut self) {
        if !self.handles.is_empty() {
            self.shutdown();
        }
    }
}
