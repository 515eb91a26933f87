//! HTTP client for the email notification service.

use agora_types::Address;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;

use crate::error::SubscriptionError;
use crate::schema::TypedDataSchema;
use crate::signer::{MessageSigner, NoSigner};

/// RPC methods accepted by the notification service root endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubscriptionMethod {
    Subscribe,
    Update,
}

impl SubscriptionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subscribe => "snapshot.subscribe",
            Self::Update => "snapshot.update",
        }
    }

    pub fn schema(&self) -> TypedDataSchema {
        match self {
            Self::Subscribe => TypedDataSchema::subscribe(),
            Self::Update => TypedDataSchema::update_subscriptions(),
        }
    }
}

/// Unsigned parameters of a new subscription.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubscribeParams {
    pub address: Address,
    pub email: String,
}

/// Unsigned parameters of a subscription update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateSubscriptionsParams {
    pub address: Address,
    pub email: String,
    pub subscriptions: Vec<String>,
}

/// Build the JSON-RPC body for `method`: the unsigned params plus `signature`.
pub fn signed_request<P: Serialize>(
    method: SubscriptionMethod,
    params: &P,
    signature: &str,
) -> Result<Value, SubscriptionError> {
    let mut params =
        serde_json::to_value(params).map_err(|e| SubscriptionError::InvalidParams(e.to_string()))?;
    params
        .as_object_mut()
        .ok_or_else(|| SubscriptionError::InvalidParams("params must be a JSON object".into()))?
        .insert("signature".to_string(), json!(signature));

    Ok(json!({
        "method": method.as_str(),
        "params": params,
    }))
}

/// Client for subscribing to and managing governance email notifications.
///
/// Wraps `reqwest::Client` with the service base URL; mutating calls are
/// signed through the supplied [`MessageSigner`] first.
pub struct SubscriptionClient<S> {
    http: reqwest::Client,
    base_url: String,
    signer: S,
}

impl SubscriptionClient<NoSigner> {
    /// A client that can only look up subscriptions, not change them.
    pub fn read_only(base_url: impl Into<String>) -> Result<Self, SubscriptionError> {
        Self::new(base_url, NoSigner)
    }
}

impl<S: MessageSigner> SubscriptionClient<S> {
    /// Create a client targeting `base_url` (e.g. `https://envelop.example`).
    pub fn new(base_url: impl Into<String>, signer: S) -> Result<Self, SubscriptionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| SubscriptionError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            signer,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up a subscriber's current settings.
    pub async fn subscription_details(&self, body: &Value) -> Result<Value, SubscriptionError> {
        self.post("/subscriber", body).await
    }

    /// Sign and submit a new subscription.
    pub async fn subscribe(&self, params: &SubscribeParams) -> Result<Value, SubscriptionError> {
        self.signed_call(SubscriptionMethod::Subscribe, params).await
    }

    /// Sign and submit a replacement set of subscription categories.
    pub async fn update_subscriptions(
        &self,
        params: &UpdateSubscriptionsParams,
    ) -> Result<Value, SubscriptionError> {
        self.signed_call(SubscriptionMethod::Update, params).await
    }

    async fn signed_call<P: Serialize>(
        &self,
        method: SubscriptionMethod,
        params: &P,
    ) -> Result<Value, SubscriptionError> {
        let message =
            serde_json::to_value(params).map_err(|e| SubscriptionError::InvalidParams(e.to_string()))?;
        let signature = self
            .signer
            .sign(&message, &method.schema())
            .await
            .map_err(|e| {
                tracing::warn!(method = method.as_str(), "signing failed: {e}");
                SubscriptionError::Sign(e)
            })?;

        let body = signed_request(method, params, &signature)?;
        self.post("/", &body).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, SubscriptionError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "posting to notification service");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| SubscriptionError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SubscriptionError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| SubscriptionError::Decode(e.to_string()))
    }
}
