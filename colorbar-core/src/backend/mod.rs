//! The color backend: `POST /color` answers with a random (or fixed) color,
//! optionally delayed or failed according to the caller's per-color
//! parameters; `GET /metrics` exposes request counters and latencies.

mod cpu_burn;
mod error;
mod gateway;
mod metrics;
mod params;
mod responder;
#[cfg(test)]
mod tests;

pub use cpu_burn::{CpuBurn, CpuBurner};
pub use error::BackendError;
pub use gateway::{ColorGateway, MAX_BODY_BYTES, RequestCtx};
pub use metrics::{BackendMetrics, RESPONSE_TIME_BUCKETS};
pub use params::{BodyBuffer, ColorParams, params_for, parse_params};
pub use responder::{ColorResponder, Decision};
