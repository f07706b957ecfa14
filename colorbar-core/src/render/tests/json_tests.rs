use crate::chart::{BucketedAggregator, Outcome, SealPolicy};
use crate::render::{JsonRenderer, Renderer};
use pretty_assertions::assert_eq;

#[test]
fn emits_each_summary_once() {
    // Arrange
    let mut agg = BucketedAggregator::new(SealPolicy::Capacity(2), 10);
    let mut renderer = JsonRenderer::new();
    for _ in 0..4 {
        agg.record("red", Outcome::Ok);
    }

    // Act
    let first = renderer.render(agg.history());
    let again = renderer.render(agg.history());
    agg.record("blue", Outcome::Error);
    agg.record("blue", Outcome::Ok);
    let third = renderer.render(agg.history());

    // Assert
    assert_eq!(first.lines().count(), 2);
    assert!(again.is_empty());
    let line: serde_json::Value = serde_json::from_str(third.trim()).unwrap();
    assert_eq!(line["sequence"], 3);
    assert_eq!(line["total"], 2);
    assert_eq!(line["entries"][0]["color"], "blue");
    assert_eq!(line["entries"][0]["percentage_error"], 0.5);
    assert_eq!(renderer.last_seen(), 3);
    assert_eq!(renderer.capacity(), None);
}
