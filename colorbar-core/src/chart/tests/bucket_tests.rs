use crate::chart::{Bucket, Outcome, OutcomeCounts};
use pretty_assertions::assert_eq;

#[test]
fn drip_keeps_total_in_sync() {
    // Arrange
    let mut bucket = Bucket::new();

    // Act
    bucket.drip("red", Outcome::Ok);
    bucket.drip("red", Outcome::Error);
    bucket.drip("blue", Outcome::Ok);

    // Assert
    assert_eq!(bucket.total(), 3);
    assert_eq!(
        bucket.counts().get("red"),
        Some(&OutcomeCounts { ok: 1, error: 1 })
    );
    assert_eq!(
        bucket.counts().get("blue"),
        Some(&OutcomeCounts { ok: 1, error: 0 })
    );
}

#[test]
fn drip_keeps_non_empty_keys_verbatim() {
    // Arrange
    let mut bucket = Bucket::new();

    // Act
    bucket.drip(" red", Outcome::Ok);
    bucket.drip("red", Outcome::Ok);
    bucket.drip("  ", Outcome::Error);
    bucket.drip("", Outcome::Error);

    // Assert
    let keys: Vec<_> = bucket.counts().keys().cloned().collect();
    assert_eq!(
        keys,
        vec![
            "  ".to_string(),
            " red".to_string(),
            "red".to_string(),
            "unknown".to_string(),
        ]
    );
    assert_eq!(bucket.total(), 4);
}

#[test]
fn empty_bucket_seals_to_nothing() {
    // Arrange
    let bucket = Bucket::default();

    // Act
    let sealed = bucket.seal(1);

    // Assert
    assert!(sealed.is_none());
}

#[test]
fn outcome_from_status() {
    assert_eq!(Outcome::from_status(200), Outcome::Ok);
    assert_eq!(Outcome::from_status(204), Outcome::Ok);
    assert_eq!(Outcome::from_status(404), Outcome::Error);
    assert_eq!(Outcome::from_status(500), Outcome::Error);
    assert!(Outcome::Error.is_error());
}
