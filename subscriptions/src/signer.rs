//! Signing collaborator interface.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::schema::TypedDataSchema;

/// The signer refused or failed to produce a signature.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct SignError(pub String);

/// Produces a typed-data signature over `message` for the current account.
#[async_trait]
pub trait MessageSigner: Send + Sync {
    async fn sign(&self, message: &Value, schema: &TypedDataSchema) -> Result<String, SignError>;
}

#[async_trait]
impl<S: MessageSigner + ?Sized> MessageSigner for &S {
    async fn sign(&self, message: &Value, schema: &TypedDataSchema) -> Result<String, SignError> {
        (**self).sign(message, schema).await
    }
}

/// Signer for read-only clients; every signing request is refused.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSigner;

#[async_trait]
impl MessageSigner for NoSigner {
    async fn sign(&self, _message: &Value, _schema: &TypedDataSchema) -> Result<String, SignError> {
        Err(SignError("no signer configured".to_string()))
    }
}
