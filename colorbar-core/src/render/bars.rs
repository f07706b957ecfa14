use crate::chart::{History, Summary};
use crate::render::Renderer;
use owo_colors::OwoColorize;
use std::fmt::Write as _;
use std::io::{self, Write};

pub const DEFAULT_BAR_WIDTH: usize = 60;

const OK_CELL: &str = "█";
const ERROR_CELL: &str = "▒";

// title, rule, legend, trailing newline
const CHROME_ROWS: usize = 4;
// "#12345 123456 "
const LABEL_WIDTH: usize = 14;

/// A run of identical cells in one bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub color: String,
    pub error: bool,
    pub cells: usize,
}

/// Split `width` cells between the entries of `summary`, ok before error
/// for each color. Edges are rounded on the cumulative share so the cells
/// always add up to exactly `width`.
pub fn segments(summary: &Summary, width: usize) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::new();
    let mut cumulative = 0.0;
    let mut drawn = 0usize;

    for entry in summary.entries() {
        for (share, error) in [(entry.percentage_ok, false), (entry.percentage_error, true)] {
            cumulative += share;
            let edge = ((cumulative * width as f64).round() as usize).min(width);
            let cells = edge.saturating_sub(drawn);
            drawn = edge;
            if cells > 0 {
                out.push(Segment {
                    color: entry.color.clone(),
                    error,
                    cells,
                });
            }
        }
    }

    if drawn < width
        && let Some(last) = out.last_mut()
    {
        last.cells += width - drawn;
    }

    out
}

/// One stacked bar per summary, newest at the bottom.
#[derive(Debug, Clone)]
pub struct BarsRenderer {
    width: usize,
    lines: Option<usize>,
    colored: bool,
}

impl Default for BarsRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_WIDTH, None)
    }
}

impl BarsRenderer {
    pub fn new(width: usize, lines: Option<usize>) -> Self {
        Self {
            width: width.max(1),
            lines,
            colored: true,
        }
    }

    /// Size from `COLUMNS` and `LINES` when the shell exports them.
    pub fn from_env() -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|n| *n > 0)
        };
        let width = read("COLUMNS")
            .map(|cols| cols.saturating_sub(LABEL_WIDTH + 2).clamp(10, 200))
            .unwrap_or(DEFAULT_BAR_WIDTH);
        Self::new(width, read("LINES"))
    }

    /// Disable ANSI colors.
    pub fn plain(mut self) -> Self {
        self.colored = false;
        self
    }

    pub fn set_lines(&mut self, lines: Option<usize>) {
        self.lines = lines;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn bar(&self, summary: &Summary) -> String {
        let mut bar = String::new();
        for segment in segments(summary, self.width) {
            let cell = if segment.error { ERROR_CELL } else { OK_CELL };
            let run = cell.repeat(segment.cells);
            if self.colored {
                bar.push_str(&paint(&run, &segment.color));
            } else {
                bar.push_str(&run);
            }
        }
        bar
    }

    fn legend(&self, summary: &Summary) -> String {
        let mut legend = String::new();
        for entry in summary.entries() {
            let label = format!(
                "{} {:.0}% ({:.0}% err)",
                entry.color,
                entry.percentage_of_total * 100.0,
                entry.percentage_error * 100.0
            );
            if self.colored {
                legend.push_str(&paint(&label, &entry.color));
            } else {
                legend.push_str(&label);
            }
            legend.push_str("  ");
        }
        legend.trim_end().to_string()
    }
}

impl Renderer for BarsRenderer {
    fn render(&mut self, history: &History) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "colorbar ({} buckets, latest #{})",
            history.len(),
            history.last_sequence()
        );
        let _ = writeln!(out, "{}", "=".repeat(LABEL_WIDTH + self.width));

        let Some(latest) = history.latest() else {
            out.push_str("waiting for the first bucket...\n");
            return out;
        };

        let rows = self.capacity().unwrap_or(history.len());
        for summary in history.tail(rows) {
            let _ = writeln!(
                out,
                "{:>6} {:>6} {}",
                format!("#{}", summary.sequence),
                summary.total,
                self.bar(summary)
            );
        }

        let _ = writeln!(out, "{}", self.legend(latest));
        out
    }

    fn capacity(&self) -> Option<usize> {
        self.lines.map(|l| l.saturating_sub(CHROME_ROWS).max(1))
    }
}

fn paint(text: &str, color: &str) -> String {
    match color {
        "red" => text.red().to_string(),
        "orange" => text.truecolor(255, 165, 0).to_string(),
        "yellow" => text.yellow().to_string(),
        "green" => text.green().to_string(),
        "blue" => text.blue().to_string(),
        "purple" => text.magenta().to_string(),
        _ => text.white().to_string(),
    }
}

/// Clear the terminal and draw `output` from the top.
pub fn redraw(output: &str) {
    print!("\x1b[2J\x1b[H");
    print!("{output}");
    let _ = io::stdout().flush();
}
