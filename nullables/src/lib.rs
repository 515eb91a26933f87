//! Nullable infrastructure for deterministic testing.
//!
//! The external collaborators (the query transport that reaches an index and
//! the signer that holds the user's key) are abstracted behind traits. This
//! crate provides test-friendly implementations that:
//! - Return scripted values in order
//! - Record what they were asked to do
//! - Never touch the network or a wallet
//!
//! Usage: swap real implementations for nullables in tests.

pub mod signer;
pub mod transport;

pub use signer::NullSigner;
pub use transport::NullTransport;
