//! Configuration: one TOML file, environment overrides for the backend's
//! fault knobs, and a validation pass that reports every problem at once.

mod env;
mod error;
mod loader;
#[cfg(test)]
mod tests;
pub mod types;
pub mod validation;

pub use env::{ENV_COLOR, ENV_ERROR_RATE, ENV_LATENCY, apply_env_overrides};
pub use error::ConfigError;
pub use loader::{
    DEFAULT_CONFIG_PATH, DEFAULT_CONFIG_TEMPLATE, load_config, load_config_str, load_or_default,
    write_default_config,
};
pub use types::{
    BackendConfig, ChartConfig, ClientConfig, ColorbarConfig, ControlConfig, SealMode,
    ServerConfig, TlsConfig,
};
pub use validation::{ValidatedConfig, ValidationReport};
