use crate::backend::BackendMetrics;
use std::time::Duration;

#[test]
fn exposition_contains_counters_and_buckets() {
    // Arrange
    let metrics = BackendMetrics::new().unwrap();
    metrics.observe("/color", 200, Duration::from_millis(3));
    metrics.observe("/color", 200, Duration::from_millis(70));
    metrics.observe("/color", 500, Duration::from_millis(200));

    // Act
    let text = metrics.encode().unwrap();

    // Assert
    assert!(text.contains(r#"http_requests_total{path="/color",status="200"} 2"#));
    assert!(text.contains(r#"http_requests_total{path="/color",status="500"} 1"#));
    assert!(text.contains(r#"http_response_time_seconds_bucket{path="/color",le="0.01"} 1"#));
    assert!(text.contains(r#"http_response_time_seconds_bucket{path="/color",le="0.1"} 2"#));
    assert!(text.contains(r#"http_response_time_seconds_bucket{path="/color",le="0.5"} 3"#));
    assert!(text.contains(r#"http_response_time_seconds_count{path="/color"} 3"#));
}

#[test]
fn registries_are_independent() {
    // Arrange
    let first = BackendMetrics::new().unwrap();
    let second = BackendMetrics::new().unwrap();

    // Act
    first.observe("/metrics", 200, Duration::ZERO);

    // Assert
    assert!(first.encode().unwrap().contains("http_requests_total"));
    assert!(!second.encode().unwrap().contains("path=\"/metrics\""));
}
