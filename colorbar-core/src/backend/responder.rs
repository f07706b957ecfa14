use crate::backend::params::{ColorParams, params_for};
use crate::conf::BackendConfig;
use rand::Rng;
use std::time::Duration;

/// What to answer for one `/color` request.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub color: String,
    pub delay: Option<Duration>,
    pub healthy: bool,
}

impl Decision {
    pub fn status(&self) -> u16 {
        if self.healthy { 200 } else { 500 }
    }

    /// The response body: the color as a JSON string.
    pub fn body(&self) -> String {
        serde_json::Value::String(self.color.clone()).to_string()
    }
}

/// Picks a color and rolls the latency and error dice for each request.
///
/// Process-wide knobs (`fixed_color`, `error_rate`, `latency`) take
/// precedence over the per-color parameters sent by the client.
#[derive(Debug, Clone)]
pub struct ColorResponder {
    colors: Vec<String>,
    fixed_color: Option<String>,
    error_rate: Option<u8>,
    latency: Option<Duration>,
}

impl ColorResponder {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            colors: config.colors.clone(),
            fixed_color: config.color.clone(),
            error_rate: config.error_rate,
            latency: config.latency_seconds.map(seconds),
        }
    }

    pub fn decide<R: Rng + ?Sized>(&self, params: &[ColorParams], rng: &mut R) -> Decision {
        let color = match &self.fixed_color {
            Some(color) => color.clone(),
            None => self.random_color(rng),
        };

        let chosen = params_for(params, &color);

        let delay = match self.latency {
            Some(latency) => Some(latency),
            None => chosen
                .filter(|p| roll(p.delay_percent, rng))
                .map(|p| seconds(p.delay_length)),
        };

        let healthy = match self.error_rate {
            Some(rate) => rng.random_range(0..100) >= i32::from(rate),
            None => !chosen.is_some_and(|p| roll(p.return_500, rng)),
        };

        Decision {
            color,
            delay,
            healthy,
        }
    }

    fn random_color<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        if self.colors.is_empty() {
            return crate::chart::UNKNOWN_COLOR.to_string();
        }
        self.colors[rng.random_range(0..self.colors.len())].clone()
    }
}

/// `p > 0 && p >= rand(0..100)`; no draw when `p` is unset or not positive.
fn roll<R: Rng + ?Sized>(percent: Option<i32>, rng: &mut R) -> bool {
    match percent {
        Some(p) if p > 0 => p >= rng.random_range(0..100),
        _ => false,
    }
}

fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
}
