use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {target} failed: {source}")]
    Transport {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected response body (status {status}): {body:?}")]
    Decode {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}
