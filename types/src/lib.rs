//! Shared types for Agora.
//!
//! Every other crate in the workspace builds on these: the deployment
//! [`Environment`], EVM [`Address`]es, second-resolution [`Timestamp`]s and the
//! common [`AgoraError`].

pub mod address;
pub mod environment;
pub mod error;
pub mod time;

pub use address::Address;
pub use environment::Environment;
pub use error::AgoraError;
pub use time::{Timestamp, TWO_WEEKS};
