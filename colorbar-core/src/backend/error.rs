use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    InvalidParams(#[from] serde_json::Error),

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("metrics registry error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("metrics exposition is not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
