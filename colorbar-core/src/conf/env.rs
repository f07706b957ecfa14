use crate::conf::error::ConfigError;
use crate::conf::types::ColorbarConfig;

pub const ENV_COLOR: &str = "COLOR";
pub const ENV_ERROR_RATE: &str = "ERROR_RATE";
pub const ENV_LATENCY: &str = "LATENCY";

/// Apply `COLOR`, `ERROR_RATE` and `LATENCY` on top of the file config.
///
/// Values are parsed here, once, so a malformed override stops startup
/// instead of failing every request. Unset or empty variables are ignored.
pub fn apply_env_overrides<F>(config: &mut ColorbarConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(color) = get(ENV_COLOR) {
        config.backend.color = Some(color.trim().to_string());
    }

    if let Some(raw) = get(ENV_ERROR_RATE) {
        let rate: u8 = raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::invalid_env(ENV_ERROR_RATE, &raw, format!("{e}")))?;
        if rate > 100 {
            return Err(ConfigError::invalid_env(
                ENV_ERROR_RATE,
                &raw,
                "must be between 0 and 100",
            ));
        }
        config.backend.error_rate = Some(rate);
    }

    if let Some(raw) = get(ENV_LATENCY) {
        let latency: f64 = raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::invalid_env(ENV_LATENCY, &raw, format!("{e}")))?;
        if !latency.is_finite() || latency < 0.0 {
            return Err(ConfigError::invalid_env(
                ENV_LATENCY,
                &raw,
                "must be a non-negative number of seconds",
            ));
        }
        config.backend.latency_seconds = Some(latency);
    }

    Ok(())
}

pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
