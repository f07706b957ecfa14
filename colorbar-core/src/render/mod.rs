//! Turning the summary history into something a terminal (or a pipe) can show.

mod bars;
mod json;
#[cfg(test)]
mod tests;

pub use bars::{BarsRenderer, DEFAULT_BAR_WIDTH, Segment, redraw, segments};
pub use json::JsonRenderer;

use crate::chart::History;

pub trait Renderer: Send {
    /// Produce the next frame for `history`.
    fn render(&mut self, history: &History) -> String;

    /// How many summaries the output can show, when bounded.
    fn capacity(&self) -> Option<usize>;
}
