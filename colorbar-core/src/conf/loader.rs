use crate::conf::env::{apply_env_overrides, process_env};
use crate::conf::error::ConfigError;
use crate::conf::types::ColorbarConfig;
use crate::conf::validation::{ValidatedConfig, validate_config};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config/colorbar.toml";

/// Read, parse, apply environment overrides and validate a config file.
pub fn load_config(path: &Path) -> Result<ValidatedConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO
    //--------------------------------------------------------------------------
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    load_config_str(&contents, path, process_env)
}

/// Load `path` when given; otherwise fall back to the default location and,
/// when nothing is there either, to built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<ValidatedConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
            load_config(Path::new(DEFAULT_CONFIG_PATH))
        }
        None => {
            debug!(event = "config_defaults", "no config file found, using defaults");
            finish(
                ColorbarConfig::default(),
                Path::new("<defaults>"),
                process_env,
            )
        }
    }
}

pub fn load_config_str<F>(
    contents: &str,
    path: &Path,
    lookup: F,
) -> Result<ValidatedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    //--------------------------------------------------------------------------
    // Hard fail: parsing
    //--------------------------------------------------------------------------
    let config: ColorbarConfig =
        toml::from_str(contents).map_err(|e| ConfigError::parse(path, e))?;

    finish(config, path, lookup)
}

fn finish<F>(
    mut config: ColorbarConfig,
    path: &Path,
    lookup: F,
) -> Result<ValidatedConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    apply_env_overrides(&mut config, lookup)?;

    //--------------------------------------------------------------------------
    // Semantic validation (aggregate all errors)
    //--------------------------------------------------------------------------
    let report = validate_config(&config, path);
    if report.has_errors() {
        return Err(ConfigError::Invalid { report });
    }

    debug!(
        event = "config_loaded",
        path = %path.display(),
        warnings = report.warnings.len(),
    );

    Ok(ValidatedConfig { config, report })
}

/// Annotated starter config written by `colorbar config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# colorbar configuration

[server]
listen = "0.0.0.0:8080"
termination_delay_seconds = 10
# threads = 4
# pid_file = "/tmp/colorbar.pid"
# cpu_burn = "all"

# [server.tls]
# cert = "certs/server.pem"
# key = "certs/server.key"

[backend]
colors = ["red", "orange", "yellow", "green", "blue", "purple"]
# color = "blue"          # env COLOR
# error_rate = 10         # env ERROR_RATE
# latency_seconds = 0.5   # env LATENCY

[chart]
seal = "window"
window_ms = 3000
history_len = 600
# capacity = 250          # only with seal = "capacity"

[client]
target = "http://127.0.0.1:8080/color"
poll_interval_ms = 20
tick_interval_ms = 15
render_interval_ms = 250
request_timeout_ms = 10000
max_in_flight = 64

# [[client.control]]
# color = "red"
# error_percent = 50
# latency_seconds = 2.0
# latency_percent = 25
"#;

pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ConfigError::write_file(parent, e))?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ConfigError::write_file(path, e))
}
