//! Signed email subscriptions for governance notifications.
//!
//! Requests to the notification service are authorized by a typed-data
//! signature from the subscriber's address. Signing is delegated to a
//! [`MessageSigner`]; this crate builds the messages and request bodies and
//! talks HTTP.

pub mod client;
pub mod error;
pub mod schema;
pub mod signer;

pub use client::{
    signed_request, SubscribeParams, SubscriptionClient, SubscriptionMethod,
    UpdateSubscriptionsParams,
};
pub use error::SubscriptionError;
pub use schema::{TypedDataSchema, TypedField};
pub use signer::{MessageSigner, NoSigner, SignError};
