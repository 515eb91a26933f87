use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoostError {
    #[error("whitelist config error: {0}")]
    Config(String),

    #[error("unknown environment in whitelist: {0}")]
    Environment(#[from] agora_types::AgoraError),

    #[error("whitelist policy already installed")]
    AlreadyInstalled,
}
