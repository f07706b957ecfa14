use integration_tests::harness::TestServer;
use pretty_assertions::assert_eq;

#[test]
fn metrics_count_requests_by_path_and_status() {
    // Arrange
    let server = TestServer::start_with(|cfg| cfg.backend.color = Some("red".to_string()));
    for _ in 0..3 {
        server.post("/color").send().unwrap();
    }
    server
        .post("/color")
        .body(r#"[{"color":"red","return500":100}]"#)
        .send()
        .unwrap();
    server.get("/nope").send().unwrap();

    // Act
    let res = server.get("/metrics").send().unwrap();

    // Assert
    assert_eq!(res.status(), 200);
    let text = res.text().unwrap();
    assert!(text.contains(r#"http_requests_total{path="/color",status="200"} 3"#));
    assert!(text.contains(r#"http_requests_total{path="/color",status="500"} 1"#));
    assert!(text.contains(r#"http_requests_total{path="other",status="404"} 1"#));
    assert!(text.contains(r#"http_response_time_seconds_bucket{path="/color",le="0.5"}"#));
    assert!(text.contains(r#"http_response_time_seconds_count{path="/color"} 4"#));
}
