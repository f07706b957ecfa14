use crate::schedule::PeriodicTask;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[tokio::test]
async fn runs_until_stopped() {
    // Arrange
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();

    // Act
    let handle = PeriodicTask::spawn("count", Duration::from_millis(5), move |_| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.join().await.unwrap();
    let at_stop = runs.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Assert
    assert!(at_stop >= 2, "only {at_stop} runs");
    assert_eq!(runs.load(Ordering::SeqCst), at_stop);
}

#[tokio::test]
async fn first_run_sees_zero_then_real_elapsed() {
    // Arrange
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();

    // Act
    let handle = PeriodicTask::spawn("elapsed", Duration::from_millis(20), move |elapsed| {
        sink.lock().unwrap().push(elapsed);
        async {}
    });
    tokio::time::sleep(Duration::from_millis(110)).await;
    handle.join().await.unwrap();

    // Assert
    let seen = seen.lock().unwrap();
    assert!(seen.len() >= 3);
    assert_eq!(seen[0], Duration::ZERO);
    assert!(seen[1..].iter().all(|e| *e >= Duration::from_millis(15)));
}

#[tokio::test]
async fn stop_is_idempotent() {
    // Arrange
    let handle = PeriodicTask::spawn("idle", Duration::from_millis(10), |_| async {});

    // Act
    handle.stop();
    handle.stop();
    let name = handle.name();
    let joined = handle.join().await;

    // Assert
    assert_eq!(name, "idle");
    assert!(joined.is_ok());
}
