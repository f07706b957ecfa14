use serde::{Deserialize, Serialize};

/// Classification of a single observed response.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Ok,
    Error,
}

impl Outcome {
    /// 2xx is a success, everything else counts against the color.
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => Outcome::Ok,
            _ => Outcome::Error,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Outcome::Error)
    }
}
