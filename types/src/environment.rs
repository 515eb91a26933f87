//! Deployment environment identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AgoraError;

/// Identifies which deployment the process serves.
///
/// Boost whitelists are keyed by environment first, so the same space can be
/// enabled on the demo deployment before it reaches production.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// The production deployment.
    Production,
    /// The public demo deployment.
    Demo,
    /// Local development.
    #[default]
    Local,
}

impl Environment {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Demo => "demo",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = AgoraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "demo" => Ok(Self::Demo),
            "local" => Ok(Self::Local),
            other => Err(AgoraError::UnknownEnvironment(other.to_string())),
        }
    }
}
