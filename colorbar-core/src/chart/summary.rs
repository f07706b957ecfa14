use serde::Serialize;

/// One color's share of a sealed bucket.
///
/// All three percentages are fractions of the *bucket* total, so
/// `percentage_ok + percentage_error == percentage_of_total` and the
/// `percentage_of_total` values of a summary add up to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub color: String,
    pub percentage_of_total: f64,
    pub percentage_ok: f64,
    pub percentage_error: f64,
}

/// Immutable snapshot of a sealed bucket, ordered by color name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Seal order, starting at 1. Strictly increasing within one aggregator.
    pub sequence: u64,

    /// Number of events the bucket held when it was sealed.
    pub total: u64,

    pub entries: Vec<SummaryEntry>,
}

impl Summary {
    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn entry(&self, color: &str) -> Option<&SummaryEntry> {
        self.entries.iter().find(|e| e.color == color)
    }

    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.color.as_str())
    }
}
