use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("unsupported standard: {0}")]
    UnsupportedStandard(String),

    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Failure reported by a [`QueryTransport`](crate::QueryTransport) implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("endpoint returned HTTP {0}")]
    Status(u16),

    #[error("query rejected: {0}")]
    Query(String),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("no response available")]
    Exhausted,
}
