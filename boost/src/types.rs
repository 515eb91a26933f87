//! Boost and proposal records as reported by the indexers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Eligibility type that pays voters for a specific choice.
pub const BRIBE: &str = "bribe";

/// A proposal, as far as boost validation needs it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    /// Voting end, Unix seconds.
    pub end: u64,
}

/// Who may claim a boost's reward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eligibility {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostStrategy {
    /// Id of the proposal this boost is attached to.
    pub proposal: String,
    pub eligibility: Eligibility,
}

/// A boost campaign. Window bounds are numeric strings of Unix seconds.
///
/// Fields not modelled here are kept in `extra` so filtered boosts serialize
/// back out unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boost {
    #[serde(default)]
    pub id: String,
    pub start: String,
    pub end: String,
    pub strategy: BoostStrategy,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Boost {
    pub fn is_bribe(&self) -> bool {
        self.strategy.eligibility.kind == BRIBE
    }
}
