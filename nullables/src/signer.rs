//! Nullable signer: fixed signatures or scripted refusals.

use agora_subscriptions::{MessageSigner, SignError, TypedDataSchema};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// A deterministic signer for testing.
pub struct NullSigner {
    outcome: Result<String, String>,
    signed: Mutex<Vec<(Value, TypedDataSchema)>>,
}

impl NullSigner {
    /// Always sign with `signature`.
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            outcome: Ok(signature.into()),
            signed: Mutex::new(Vec::new()),
        }
    }

    /// Always refuse, as a user rejecting the wallet prompt would.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            outcome: Err(reason.into()),
            signed: Mutex::new(Vec::new()),
        }
    }

    /// Every (message, schema) pair presented for signing.
    pub fn requests(&self) -> Vec<(Value, TypedDataSchema)> {
        self.signed.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSigner for NullSigner {
    async fn sign(&self, message: &Value, schema: &TypedDataSchema) -> Result<String, SignError> {
        self.signed.lock().unwrap().push((message.clone(), schema.clone()));
        self.outcome.clone().map_err(SignError)
    }
}
