use crate::conf::{ColorbarConfig, ConfigError, apply_env_overrides, load_config_str};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::path::Path;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn overrides_replace_file_values() {
    // Arrange
    let toml = "[backend]\ncolor = \"red\"\nerror_rate = 5\n";
    let lookup = env(&[("COLOR", " blue "), ("ERROR_RATE", "40"), ("LATENCY", "0.25")]);

    // Act
    let config = load_config_str(toml, Path::new("c.toml"), lookup)
        .unwrap()
        .config;

    // Assert
    assert_eq!(config.backend.color.as_deref(), Some("blue"));
    assert_eq!(config.backend.error_rate, Some(40));
    assert_eq!(config.backend.latency_seconds, Some(0.25));
}

#[test]
fn empty_overrides_are_ignored() {
    // Arrange
    let mut config = ColorbarConfig::default();
    let lookup = env(&[("COLOR", ""), ("ERROR_RATE", "  ")]);

    // Act
    apply_env_overrides(&mut config, lookup).unwrap();

    // Assert
    assert_eq!(config.backend.color, None);
    assert_eq!(config.backend.error_rate, None);
}

#[test]
fn malformed_error_rate_fails_fast() {
    // Arrange
    let mut config = ColorbarConfig::default();

    // Act
    let not_a_number = apply_env_overrides(&mut config, env(&[("ERROR_RATE", "ten")]));
    let out_of_range = apply_env_overrides(&mut config, env(&[("ERROR_RATE", "101")]));

    // Assert
    assert!(matches!(
        not_a_number,
        Err(ConfigError::InvalidEnv { name: "ERROR_RATE", .. })
    ));
    assert!(matches!(
        out_of_range,
        Err(ConfigError::InvalidEnv { name: "ERROR_RATE", .. })
    ));
}

#[test]
fn negative_latency_fails_fast() {
    // Arrange
    let mut config = ColorbarConfig::default();

    // Act
    let err = apply_env_overrides(&mut config, env(&[("LATENCY", "-1")])).unwrap_err();

    // Assert
    assert!(err.to_string().contains("LATENCY"));
    assert_eq!(config.backend.latency_seconds, None);
}
