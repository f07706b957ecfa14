use crate::chart::Outcome;
use crate::client::{ClientError, ColorControls};
use crate::conf::ClientConfig;
use serde::Serialize;
use std::sync::Arc;

/// One answered poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEvent {
    pub color: String,
    pub outcome: Outcome,
    pub status: u16,
}

/// POSTs the current controls to the color endpoint and reports the answer.
#[derive(Debug, Clone)]
pub struct ColorClient {
    http: reqwest::Client,
    target: String,
    controls: Arc<ColorControls>,
}

impl ColorClient {
    pub fn new(config: &ClientConfig, controls: Arc<ColorControls>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|source| ClientError::Transport {
                target: config.target.clone(),
                source,
            })?;

        Ok(Self {
            http,
            target: config.target.clone(),
            controls,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn controls(&self) -> &Arc<ColorControls> {
        &self.controls
    }

    pub async fn poll(&self) -> Result<ColorEvent, ClientError> {
        let transport = |source| ClientError::Transport {
            target: self.target.clone(),
            source,
        };

        let response = self
            .http
            .post(&self.target)
            .body(self.controls.body())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport)?;

        let event = decode_event(status, &text)?;
        self.controls.register(&event.color);
        Ok(event)
    }
}

/// Turn a status and a JSON-string body into an event.
pub fn decode_event(status: u16, body: &str) -> Result<ColorEvent, ClientError> {
    let color: String = serde_json::from_str(body).map_err(|source| ClientError::Decode {
        status,
        body: body.to_string(),
        source,
    })?;

    Ok(ColorEvent {
        color,
        outcome: Outcome::from_status(status),
        status,
    })
}
