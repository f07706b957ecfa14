use crate::chart::{DEFAULT_HISTORY_LEN, SealPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_COLORS: [&str; 6] = ["red", "orange", "yellow", "green", "blue", "purple"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorbarConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub chart: ChartConfig,
    pub client: ClientConfig,
}

//-----------------------------------------------------------------------------
// Server
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// e.g. "0.0.0.0:8080"
    pub listen: String,

    /// Optional number of worker threads - default is decided by Pingora.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    /// Grace period between a termination signal and the start of shutdown,
    /// giving load balancers time to drain this instance.
    pub termination_delay_seconds: u64,

    /// Optional pid file path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid_file: Option<PathBuf>,

    /// Number of CPUs to keep busy ("all" or a count).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_burn: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
            threads: None,
            termination_delay_seconds: 10,
            pid_file: None,
            cpu_burn: None,
            tls: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TlsConfig {
    pub cert: String,
    pub key: String,
}

//-----------------------------------------------------------------------------
// Backend
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// Palette a random color is drawn from.
    pub colors: Vec<String>,

    /// Always answer with this color. Overridden by `COLOR`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Percentage of requests answered with a 500, ignoring per-color
    /// parameters. Overridden by `ERROR_RATE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<u8>,

    /// Fixed delay applied to every request, ignoring per-color parameters.
    /// Overridden by `LATENCY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_seconds: Option<f64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
            color: None,
            error_rate: None,
            latency_seconds: None,
        }
    }
}

//-----------------------------------------------------------------------------
// Chart
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SealMode {
    #[default]
    Window,
    Capacity,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub seal: SealMode,

    pub window_ms: u64,

    /// Events per bucket under `seal = "capacity"`. Derived from the window
    /// and the client poll interval when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u64>,

    pub history_len: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            seal: SealMode::Window,
            window_ms: 3000,
            capacity: None,
            history_len: DEFAULT_HISTORY_LEN,
        }
    }
}

impl ChartConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn seal_policy(&self, poll_interval: Duration) -> SealPolicy {
        match (self.seal, self.capacity) {
            (SealMode::Window, _) => SealPolicy::Window(self.window()),
            (SealMode::Capacity, Some(capacity)) => SealPolicy::Capacity(capacity),
            (SealMode::Capacity, None) => SealPolicy::capacity_for(self.window(), poll_interval),
        }
    }
}

//-----------------------------------------------------------------------------
// Client
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Full URL of the color endpoint.
    pub target: String,

    pub poll_interval_ms: u64,
    pub tick_interval_ms: u64,
    pub render_interval_ms: u64,
    pub request_timeout_ms: u64,

    /// Polls allowed in flight at once; ticks beyond this are skipped.
    pub max_in_flight: usize,

    /// Fault-injection presets sent along with every poll.
    #[serde(default, rename = "control")]
    pub controls: Vec<ControlConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            target: "http://127.0.0.1:8080/color".to_string(),
            poll_interval_ms: 20,
            tick_interval_ms: 15,
            render_interval_ms: 250,
            request_timeout_ms: 10_000,
            max_in_flight: 64,
            controls: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ControlConfig {
    pub color: String,

    #[serde(default)]
    pub error_percent: u8,

    #[serde(default)]
    pub latency_seconds: f64,

    /// Chance that the latency is applied at all.
    #[serde(default = "default_latency_percent")]
    pub latency_percent: u8,
}

fn default_latency_percent() -> u8 {
    100
}
