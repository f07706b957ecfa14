use crate::backend::ColorParams;
use crate::conf::ControlConfig;
use std::sync::{Mutex, PoisonError};

/// Body sent while no color is registered.
pub const EMPTY_BODY: &str = "[]";

/// Fault-injection settings for one color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorControl {
    pub error_percent: u8,
    pub latency_seconds: f64,
    pub latency_percent: u8,
}

impl Default for ColorControl {
    fn default() -> Self {
        Self {
            error_percent: 0,
            latency_seconds: 0.0,
            latency_percent: 100,
        }
    }
}

impl ColorControl {
    fn to_params(self, color: &str) -> ColorParams {
        ColorParams {
            color: color.to_string(),
            delay_percent: Some(i32::from(self.latency_percent)),
            delay_length: self.latency_seconds,
            return_500: Some(i32::from(self.error_percent)),
        }
    }
}

impl From<&ControlConfig> for ColorControl {
    fn from(c: &ControlConfig) -> Self {
        Self {
            error_percent: c.error_percent,
            latency_seconds: c.latency_seconds,
            latency_percent: c.latency_percent,
        }
    }
}

/// Registered colors in first-seen order, shared by every in-flight poll.
#[derive(Debug, Default)]
pub struct ColorControls {
    entries: Mutex<Vec<(String, ColorControl)>>,
}

impl ColorControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(presets: &[ControlConfig]) -> Self {
        let controls = Self::new();
        for preset in presets {
            controls.set(&preset.color, ColorControl::from(preset));
        }
        controls
    }

    /// Register a color seen in a response. Returns `true` when it was new.
    pub fn register(&self, color: &str) -> bool {
        let color = color.trim();
        if color.is_empty() {
            return false;
        }
        let mut entries = self.lock();
        if entries.iter().any(|(c, _)| c == color) {
            return false;
        }
        entries.push((color.to_string(), ColorControl::default()));
        true
    }

    /// Insert or replace the settings for `color`.
    pub fn set(&self, color: &str, control: ColorControl) {
        let color = color.trim();
        let mut entries = self.lock();
        match entries.iter_mut().find(|(c, _)| c == color) {
            Some((_, existing)) => *existing = control,
            None => entries.push((color.to_string(), control)),
        }
    }

    pub fn get(&self, color: &str) -> Option<ColorControl> {
        self.lock()
            .iter()
            .find(|(c, _)| c == color)
            .map(|(_, control)| *control)
    }

    pub fn colors(&self) -> Vec<String> {
        self.lock().iter().map(|(c, _)| c.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// JSON array of every registered control, or [`EMPTY_BODY`].
    pub fn body(&self) -> String {
        let params: Vec<ColorParams> = self
            .lock()
            .iter()
            .map(|(color, control)| control.to_params(color))
            .collect();

        if params.is_empty() {
            return EMPTY_BODY.to_string();
        }
        serde_json::to_string(&params).unwrap_or_else(|_| EMPTY_BODY.to_string())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(String, ColorControl)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
