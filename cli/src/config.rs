//! Agora configuration with TOML file support.

use agora_boost::WhitelistPolicy;
use agora_governance::GovernanceStandard;
use agora_types::Environment;
use agora_utils::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Configuration for the `agora` binary.
///
/// Can be loaded from a TOML file via [`AgoraConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). The boost whitelist lives under
/// `[whitelist.<environment>."<space>"]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AgoraConfig {
    /// Which deployment's whitelist applies.
    #[serde(default)]
    pub environment: Environment,

    /// GraphQL endpoint of the governance subgraph.
    #[serde(default = "default_subgraph_url")]
    pub subgraph_url: String,

    /// Base URL of the email notification service.
    #[serde(default = "default_subscriptions_url")]
    pub subscriptions_url: String,

    /// Governance standard identifier, e.g. `compound-governor`.
    #[serde(default = "default_standard")]
    pub standard: String,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Boost whitelist, per environment and space.
    #[serde(default)]
    pub whitelist: WhitelistPolicy,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_subgraph_url() -> String {
    "http://127.0.0.1:8000/subgraphs/name/governance".to_string()
}

fn default_subscriptions_url() -> String {
    "http://127.0.0.1:3006".to_string()
}

fn default_standard() -> String {
    GovernanceStandard::CompoundGovernor.as_str().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl AgoraConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

impl Default for AgoraConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            subgraph_url: default_subgraph_url(),
            subscriptions_url: default_subscriptions_url(),
            standard: default_standard(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            whitelist: WhitelistPolicy::default(),
        }
    }
}
