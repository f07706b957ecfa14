use colorbar_core::conf::{ColorbarConfig, ControlConfig, SealMode};
use colorbar_core::render::JsonRenderer;
use colorbar_core::watch::{WatchOptions, run_watch};
use integration_tests::harness::TestServer;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn watch_config(server: &TestServer) -> ColorbarConfig {
    let mut cfg = ColorbarConfig::default();
    cfg.client.target = server.url("/color");
    cfg.client.poll_interval_ms = 10;
    cfg.client.tick_interval_ms = 10;
    cfg.client.render_interval_ms = 50;
    cfg.client.request_timeout_ms = 2000;
    cfg.chart.window_ms = 300;
    cfg
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn live_backend_fills_the_history() {
    // Arrange
    let server = TestServer::start();
    let cfg = watch_config(&server);
    let lines = Arc::new(Mutex::new(String::new()));
    let sink = {
        let lines = lines.clone();
        move |frame: &str| lines.lock().unwrap().push_str(frame)
    };

    // Act
    let (history, stats) = run_watch(
        &cfg,
        Box::new(JsonRenderer::new()),
        sink,
        WatchOptions {
            duration: Some(Duration::from_millis(1500)),
        },
    )
    .await
    .unwrap();

    // Assert
    assert!(stats.ok() > 0);
    assert!(history.len() >= 3, "only {} summaries", history.len());
    for summary in history.iter() {
        let sum: f64 = summary.entries.iter().map(|e| e.percentage_of_total).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(
            summary
                .colors()
                .all(|c| cfg.backend.colors.iter().any(|p| p == c))
        );
    }
    let emitted = lines.lock().unwrap().lines().count() as u64;
    assert_eq!(emitted, history.last_sequence());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn controls_drive_error_share() {
    // Arrange
    let server = TestServer::start_with(|cfg| cfg.backend.color = Some("red".to_string()));
    let mut cfg = watch_config(&server);
    cfg.client.controls = vec![ControlConfig {
        color: "red".to_string(),
        error_percent: 100,
        latency_seconds: 0.0,
        latency_percent: 0,
    }];

    // Act
    let (history, _) = run_watch(
        &cfg,
        Box::new(JsonRenderer::new()),
        |_: &str| {},
        WatchOptions {
            duration: Some(Duration::from_millis(800)),
        },
    )
    .await
    .unwrap();

    // Assert
    assert!(!history.is_empty());
    for summary in history.iter() {
        let red = summary.entry("red").unwrap();
        assert_eq!(red.percentage_error, 1.0);
        assert_eq!(red.percentage_ok, 0.0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn capacity_mode_seals_fixed_size_buckets() {
    // Arrange
    let server = TestServer::start();
    let mut cfg = watch_config(&server);
    cfg.chart.seal = SealMode::Capacity;
    cfg.chart.capacity = Some(10);

    // Act
    let (history, _) = run_watch(
        &cfg,
        Box::new(JsonRenderer::new()),
        |_: &str| {},
        WatchOptions {
            duration: Some(Duration::from_millis(1000)),
        },
    )
    .await
    .unwrap();

    // Assert: every bucket but a flushed partial one holds exactly 10 events.
    let totals: Vec<u64> = history.iter().map(|s| s.total).collect();
    assert!(totals.len() >= 2);
    assert!(totals[..totals.len() - 1].iter().all(|t| *t == 10));
    assert!(*totals.last().unwrap() <= 10);
}
