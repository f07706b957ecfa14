use crate::backend::BackendError;
use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};

/// Body the dashboard sends when it has no controls registered yet.
const EMPTY_SENTINEL: &[u8] = b"\"[]\"";

/// Per-color fault-injection parameters carried in a `/color` request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorParams {
    pub color: String,

    /// Chance (0-100) that `delay_length` is applied.
    #[serde(
        rename = "delayPercent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delay_percent: Option<i32>,

    /// Seconds.
    #[serde(rename = "delayLength", default)]
    pub delay_length: f64,

    /// Chance (0-100) that the request fails with a 500.
    #[serde(rename = "return500", default, skip_serializing_if = "Option::is_none")]
    pub return_500: Option<i32>,
}

/// Decode a request body. Empty bodies and the `"[]"` string mean no parameters.
pub fn parse_params(body: &[u8]) -> Result<Vec<ColorParams>, BackendError> {
    if body.is_empty() || body == EMPTY_SENTINEL {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(body)?)
}

/// The last entry naming `color` wins.
pub fn params_for<'a>(params: &'a [ColorParams], color: &str) -> Option<&'a ColorParams> {
    params.iter().rev().find(|p| p.color == color)
}

/// Request body collected chunk by chunk up to a byte limit.
#[derive(Debug)]
pub struct BodyBuffer {
    buf: BytesMut,
    limit: usize,
}

impl BodyBuffer {
    pub fn new(limit: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            limit,
        }
    }

    pub fn push(&mut self, chunk: &[u8]) -> Result<(), BackendError> {
        if self.buf.len() + chunk.len() > self.limit {
            return Err(BackendError::BodyTooLarge { limit: self.limit });
        }
        self.buf.extend_from_slice(chunk);
        Ok(())
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}
