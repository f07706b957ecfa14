use crate::backend::BackendError;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

pub const RESPONSE_TIME_BUCKETS: [f64; 4] = [0.01, 0.05, 0.1, 0.5];

/// Request counters and latency histograms served on `/metrics`.
///
/// Owns its registry so several servers (tests included) can live in one
/// process without colliding in the global default registry.
pub struct BackendMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    response_time: HistogramVec,
}

impl BackendMetrics {
    pub fn new() -> Result<Self, BackendError> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Number of requests."),
            &["path", "status"],
        )?;
        let response_time = HistogramVec::new(
            HistogramOpts::new("http_response_time_seconds", "Duration of HTTP requests.")
                .buckets(RESPONSE_TIME_BUCKETS.to_vec()),
            &["path"],
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(response_time.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            response_time,
        })
    }

    pub fn observe(&self, path: &str, status: u16, elapsed: Duration) {
        let status = status.to_string();
        self.requests_total
            .with_label_values(&[path, status.as_str()])
            .inc();
        self.response_time
            .with_label_values(&[path])
            .observe(elapsed.as_secs_f64());
    }

    /// Prometheus text exposition of everything registered.
    pub fn encode(&self) -> Result<String, BackendError> {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}
