//! REST error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("HTTP error calling {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}: {body}")]
    HttpStatus { url: String, status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("transaction error: {0}")]
    Tx(#[from] flow_tx::TxError),

    #[error("invalid key description: {0}")]
    Types(#[from] flow_types::TypesError),

    #[error("{0}")]
    Other(String),
}
