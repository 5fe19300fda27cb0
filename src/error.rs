// Error types for the econops client.
// Covers configuration, serialization, transport, and cache filesystem errors.

use thiserror::Error;

/// Name of the environment variable consulted when no token is configured.
pub const TOKEN_ENV: &str = "econops_token";

#[derive(Error, Debug)]
pub enum EconopsError {
    #[error("API token not provided and '{TOKEN_ENV}' environment variable not set")]
    MissingToken,

    #[error("payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("cache error: {0}")]
    Cache(#[from] std::io::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),
}

pub type Result<T> = std::result::Result<T, EconopsError>;
