use crate::chart::SealPolicy;
use crate::conf::{
    ConfigError, DEFAULT_CONFIG_TEMPLATE, SealMode, load_config, load_config_str,
    write_default_config,
};
use pretty_assertions::assert_eq;
use std::path::Path;
use std::time::Duration;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn empty_file_yields_defaults() {
    // Arrange
    let path = Path::new("colorbar.toml");

    // Act
    let validated = load_config_str("", path, no_env).expect("defaults are valid");

    // Assert
    let config = validated.config;
    assert_eq!(config.server.listen, "0.0.0.0:8080");
    assert_eq!(config.server.termination_delay_seconds, 10);
    assert_eq!(config.backend.colors.len(), 6);
    assert_eq!(config.chart.seal, SealMode::Window);
    assert_eq!(config.chart.window_ms, 3000);
    assert_eq!(config.chart.history_len, 600);
    assert_eq!(config.client.poll_interval_ms, 20);
    assert!(config.client.controls.is_empty());
    assert!(!validated.report.has_violations());
}

#[test]
fn template_parses_cleanly() {
    // Act
    let validated = load_config_str(DEFAULT_CONFIG_TEMPLATE, Path::new("t.toml"), no_env)
        .expect("template must be valid");

    // Assert
    assert!(!validated.report.has_violations());
    assert_eq!(validated.config.client.target, "http://127.0.0.1:8080/color");
}

#[test]
fn parses_controls_and_capacity_mode() {
    // Arrange
    let toml = r#"
        [chart]
        seal = "capacity"
        window_ms = 5000

        [client]
        poll_interval_ms = 20

        [[client.control]]
        color = "red"
        error_percent = 50

        [[client.control]]
        color = "blue"
        latency_seconds = 1.5
        latency_percent = 25
    "#;

    // Act
    let config = load_config_str(toml, Path::new("c.toml"), no_env)
        .unwrap()
        .config;

    // Assert
    assert_eq!(config.client.controls.len(), 2);
    assert_eq!(config.client.controls[0].latency_percent, 100);
    assert_eq!(config.client.controls[1].latency_seconds, 1.5);
    assert_eq!(
        config.chart.seal_policy(config.client.poll_interval()),
        SealPolicy::Capacity(250)
    );
}

#[test]
fn window_mode_policy_uses_window() {
    // Arrange
    let toml = "[chart]\nwindow_ms = 1500\n";

    // Act
    let config = load_config_str(toml, Path::new("c.toml"), no_env)
        .unwrap()
        .config;

    // Assert
    assert_eq!(
        config.chart.seal_policy(Duration::from_millis(20)),
        SealPolicy::Window(Duration::from_millis(1500))
    );
}

#[test]
fn unknown_fields_are_parse_errors() {
    // Arrange
    let toml = "[server]\nlisten_addr = \":8080\"\n";

    // Act
    let err = load_config_str(toml, Path::new("bad.toml"), no_env).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn invalid_values_are_aggregated() {
    // Arrange
    let toml = r#"
        [server]
        listen = "nope"

        [chart]
        history_len = 0

        [client]
        max_in_flight = 0
    "#;

    // Act
    let err = load_config_str(toml, Path::new("bad.toml"), no_env).unwrap_err();

    // Assert
    match err {
        ConfigError::Invalid { report } => assert_eq!(report.errors.len(), 3),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_config_reads_from_disk() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("colorbar.toml");
    std::fs::write(&path, "[server]\nlisten = \"127.0.0.1:9090\"\n").unwrap();

    // Act
    let validated = load_config(&path).unwrap();

    // Assert
    assert_eq!(validated.config.server.listen, "127.0.0.1:9090");
}

#[test]
fn load_config_reports_missing_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    // Act
    let err = load_config(&path).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn init_writes_template_once() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/colorbar.toml");

    // Act
    let first = write_default_config(&path);
    let second = write_default_config(&path);

    // Assert
    assert!(first.is_ok());
    assert!(matches!(second, Err(ConfigError::AlreadyExists { .. })));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        DEFAULT_CONFIG_TEMPLATE
    );
}
