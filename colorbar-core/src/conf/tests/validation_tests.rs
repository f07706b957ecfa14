use crate::conf::types::{ColorbarConfig, ControlConfig, SealMode, TlsConfig};
use crate::conf::validation::{Severity, validate_config};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn file() -> &'static Path {
    Path::new("/test/colorbar.toml")
}

fn control(color: &str) -> ControlConfig {
    ControlConfig {
        color: color.to_string(),
        error_percent: 0,
        latency_seconds: 0.0,
        latency_percent: 100,
    }
}

#[test]
fn default_config_has_no_violations() {
    // Arrange
    let config = ColorbarConfig::default();

    // Act
    let report = validate_config(&config, file());

    // Assert
    assert!(!report.has_violations());
}

#[test]
fn out_of_range_percentages_are_errors() {
    // Arrange
    let mut config = ColorbarConfig::default();
    config.backend.error_rate = Some(150);
    let mut bad = control("red");
    bad.latency_percent = 101;
    config.client.controls.push(bad);

    // Act
    let report = validate_config(&config, file());

    // Assert
    assert_eq!(report.errors.len(), 2);
    assert_eq!(
        report.errors[0].message,
        "invalid backend.error_rate: 150% (must be between 0% and 100%)"
    );
    assert_eq!(report.errors[1].origin.index, Some(0));
}

#[test]
fn nan_latency_is_rejected() {
    // Arrange
    let mut config = ColorbarConfig::default();
    config.backend.latency_seconds = Some(f64::NAN);

    // Act
    let report = validate_config(&config, file());

    // Assert
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn duplicate_controls_warn() {
    // Arrange
    let mut config = ColorbarConfig::default();
    config.client.controls = vec![control("red"), control("blue"), control("red")];

    // Act
    let report = validate_config(&config, file());

    // Assert
    assert!(report.errors.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].severity, Severity::Warning);
    assert_eq!(report.warnings[0].origin.index, Some(2));
}

#[test]
fn fixed_color_outside_palette_warns() {
    // Arrange
    let mut config = ColorbarConfig::default();
    config.backend.color = Some("chartreuse".to_string());

    // Act
    let report = validate_config(&config, file());

    // Assert
    assert!(!report.has_errors());
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn missing_tls_files_are_errors() {
    // Arrange
    let mut config = ColorbarConfig::default();
    config.server.tls = Some(TlsConfig {
        cert: "/nonexistent/cert.pem".to_string(),
        key: "/nonexistent/key.pem".to_string(),
    });

    // Act
    let report = validate_config(&config, file());

    // Assert
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].origin.section, "server.tls");
}

#[test]
fn bad_target_and_cpu_burn_are_errors() {
    // Arrange
    let mut config = ColorbarConfig::default();
    config.client.target = "ftp://example.com/color".to_string();
    config.server.cpu_burn = Some("lots".to_string());

    // Act
    let report = validate_config(&config, file());

    // Assert
    assert_eq!(report.errors.len(), 2);
}

#[test]
fn pid_file_parent_must_exist() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut ok = ColorbarConfig::default();
    ok.server.pid_file = Some(dir.path().join("colorbar.pid"));
    let mut bad = ColorbarConfig::default();
    bad.server.pid_file = Some(PathBuf::from("/nonexistent/dir/colorbar.pid"));

    // Act
    let ok_report = validate_config(&ok, file());
    let bad_report = validate_config(&bad, file());

    // Assert
    assert!(!ok_report.has_errors());
    assert_eq!(bad_report.errors.len(), 1);
}

#[test]
fn capacity_outside_capacity_mode_warns() {
    // Arrange
    let mut config = ColorbarConfig::default();
    config.chart.capacity = Some(100);

    // Act
    let window_report = validate_config(&config, file());
    config.chart.seal = SealMode::Capacity;
    config.chart.capacity = Some(0);
    let capacity_report = validate_config(&config, file());

    // Assert
    assert_eq!(window_report.warnings.len(), 1);
    assert_eq!(capacity_report.errors.len(), 1);
}

#[test]
fn renderers_include_every_issue() {
    // Arrange
    let mut config = ColorbarConfig::default();
    config.server.listen = "bogus".to_string();
    config.client.controls = vec![control("red"), control("red")];
    let report = validate_config(&config, file());

    // Act
    let plain = report.render_plain();
    let pretty = report.render_pretty();
    let json: serde_json::Value = serde_json::from_str(&report.render_json()).unwrap();

    // Assert
    assert!(plain.contains("/test/colorbar.toml: [server]:error: invalid listen address: bogus"));
    assert!(plain.contains("help: use host:port"));
    assert!(pretty.contains("1 errors, 1 warnings"));
    assert_eq!(json["errors"][0]["severity"], "error");
    assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
}
