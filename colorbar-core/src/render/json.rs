use crate::chart::History;
use crate::render::Renderer;
use tracing::warn;

/// Newline-delimited JSON, one line per summary sealed since the last call.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer {
    last_seen: u64,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_seen(&self) -> u64 {
        self.last_seen
    }
}

impl Renderer for JsonRenderer {
    fn render(&mut self, history: &History) -> String {
        let mut out = String::new();
        for summary in history.newer_than(self.last_seen) {
            match serde_json::to_string(summary) {
                Ok(line) => {
                    out.push_str(&line);
                    out.push('\n');
                }
                Err(e) => warn!(event = "summary_encode_failed", sequence = summary.sequence, error = %e),
            }
        }
        self.last_seen = self.last_seen.max(history.last_sequence());
        out
    }

    fn capacity(&self) -> Option<usize> {
        None
    }
}
