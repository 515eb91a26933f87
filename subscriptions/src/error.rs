use thiserror::Error;

use crate::signer::SignError;

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("sign_error: {0}")]
    Sign(#[from] SignError),

    #[error("request failed: {0}")]
    Http(String),

    #[error("notification service returned HTTP {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("invalid request parameters: {0}")]
    InvalidParams(String),
}

impl SubscriptionError {
    /// Stable machine-readable code, as reported to callers of the service.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sign(_) => "sign_error",
            Self::Http(_) => "http_error",
            Self::Status(_) => "status_error",
            Self::Decode(_) => "decode_error",
            Self::InvalidParams(_) => "invalid_params",
        }
    }
}
