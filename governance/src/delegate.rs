//! Normalized delegate records shared by every governance standard.
//!
//! Strategies map their protocol-specific responses into these shapes. All
//! numeric fields have a defined default so downstream consumers never see a
//! missing value or a NaN.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A delegate in a listing, with its share of delegators and votes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegate {
    pub id: String,
    /// Votes delegated to this address, as the indexer's decimal string.
    pub delegated_votes: String,
    pub token_holders_represented_amount: u64,
    /// Share of all token holders represented, in `[0, 1]`, `0` when unknown.
    pub delegators_percentage: f64,
    /// Share of all delegated votes, in `[0, 1]`, `0` when unknown.
    pub votes_percentage: f64,
    #[serde(default)]
    pub statement: String,
}

/// A single delegate's detail record, including its own token balance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateWithBalance {
    pub id: String,
    pub delegated_votes: String,
    pub token_holders_represented_amount: u64,
    pub token_balance: String,
    pub delegators_percentage: f64,
    pub votes_percentage: f64,
}

impl From<Delegate> for DelegateWithBalance {
    fn from(d: Delegate) -> Self {
        Self {
            id: d.id,
            delegated_votes: d.delegated_votes,
            token_holders_represented_amount: d.token_holders_represented_amount,
            token_balance: "0".to_string(),
            delegators_percentage: d.delegators_percentage,
            votes_percentage: d.votes_percentage,
        }
    }
}

/// Protocol-wide totals returned alongside delegate data.
///
/// Only meaningful for the query execution that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceAggregate {
    pub delegated_votes: String,
    pub total_token_holders: String,
    pub total_delegates: String,
}

impl Default for GovernanceAggregate {
    fn default() -> Self {
        Self {
            delegated_votes: "0".to_string(),
            total_token_holders: "0".to_string(),
            total_delegates: "0".to_string(),
        }
    }
}

impl GovernanceAggregate {
    /// Read an aggregate object, defaulting each missing total to `"0"`.
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(obj) = value.filter(|v| v.is_object()) else {
            return Self::default();
        };
        Self {
            delegated_votes: decimal_field(obj, "delegatedVotes").unwrap_or_else(zero),
            total_token_holders: decimal_field(obj, "totalTokenHolders").unwrap_or_else(zero),
            total_delegates: decimal_field(obj, "totalDelegates").unwrap_or_else(zero),
        }
    }

    /// `represented / totalTokenHolders`.
    pub fn delegators_share(&self, represented: u64) -> f64 {
        ratio(represented as f64, numeric(&self.total_token_holders))
    }

    /// `votes / delegatedVotes`.
    pub fn votes_share(&self, votes: &str) -> f64 {
        ratio(numeric(votes), numeric(&self.delegated_votes))
    }
}

/// How a client invokes the on-chain delegation call for a standard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegateMethod {
    /// Human-readable ABI fragments.
    pub abi: Vec<String>,
    /// Name of the function to call.
    pub action: String,
}

// ── Numeric helpers ────────────────────────────────────────────────────

fn zero() -> String {
    "0".to_string()
}

/// Parse a decimal string. Empty means zero; unparseable means NaN.
pub fn numeric(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Divide, collapsing every non-finite outcome (zero or bad denominator) to `0`.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return 0.0;
    }
    let r = numerator / denominator;
    if r.is_finite() {
        r
    } else {
        0.0
    }
}

/// Read a big-number field that indexers may encode as a string or a number.
pub fn decimal_field(obj: &Value, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a count field, accepting integers, integral floats and numeric strings.
pub fn integer_field(obj: &Value, key: &str) -> Option<u64> {
    match obj.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a plain string field.
pub fn string_field(obj: &Value, key: &str) -> Option<String> {
    obj.get(key)?.as_str().map(str::to_string)
}
