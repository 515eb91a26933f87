//! Library half of the `agora` binary: configuration and the HTTP query
//! transport.

pub mod config;
pub mod error;
pub mod input;
pub mod transport;

pub use config::AgoraConfig;
pub use error::{ConfigError, InputError};
pub use input::{decode_records, read_records};
pub use transport::{render_graphql, HttpTransport};
