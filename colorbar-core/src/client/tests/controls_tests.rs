use crate::backend::parse_params;
use crate::client::{ColorControl, ColorControls, EMPTY_BODY};
use crate::conf::ControlConfig;
use pretty_assertions::assert_eq;

#[test]
fn empty_controls_send_sentinel() {
    // Arrange
    let controls = ColorControls::new();

    // Act
    let body = controls.body();

    // Assert
    assert_eq!(body, EMPTY_BODY);
    assert!(parse_params(body.as_bytes()).unwrap().is_empty());
}

#[test]
fn registered_colors_keep_first_seen_order() {
    // Arrange
    let controls = ColorControls::new();

    // Act
    let first = controls.register("red");
    let again = controls.register("red");
    controls.register("blue");
    let blank = controls.register("  ");

    // Assert
    assert!(first);
    assert!(!again);
    assert!(!blank);
    assert_eq!(controls.colors(), vec!["red".to_string(), "blue".to_string()]);
}

#[test]
fn body_round_trips_through_backend_parser() {
    // Arrange
    let controls = ColorControls::new();
    controls.register("green");
    controls.set(
        "red",
        ColorControl {
            error_percent: 40,
            latency_seconds: 1.5,
            latency_percent: 25,
        },
    );

    // Act
    let params = parse_params(controls.body().as_bytes()).unwrap();

    // Assert
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].color, "green");
    assert_eq!(params[0].return_500, Some(0));
    assert_eq!(params[0].delay_percent, Some(100));
    assert_eq!(params[1].color, "red");
    assert_eq!(params[1].return_500, Some(40));
    assert_eq!(params[1].delay_percent, Some(25));
    assert_eq!(params[1].delay_length, 1.5);
}

#[test]
fn wire_format_uses_dashboard_field_names() {
    // Arrange
    let controls = ColorControls::new();
    controls.register("blue");

    // Act
    let body: serde_json::Value = serde_json::from_str(&controls.body()).unwrap();

    // Assert
    assert_eq!(
        body,
        serde_json::json!([
            {"color": "blue", "delayPercent": 100, "delayLength": 0.0, "return500": 0}
        ])
    );
}

#[test]
fn presets_are_registered_up_front() {
    // Arrange
    let presets = vec![ControlConfig {
        color: "purple".to_string(),
        error_percent: 10,
        latency_seconds: 0.0,
        latency_percent: 100,
    }];

    // Act
    let controls = ColorControls::from_config(&presets);
    let registered_again = controls.register("purple");

    // Assert
    assert!(!registered_again);
    assert_eq!(controls.get("purple").unwrap().error_percent, 10);
}
