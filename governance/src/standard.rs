//! Governance standards and the strategy each one implements.
//!
//! A standard is a protocol shape (e.g. a Compound-style governor) whose index
//! layout and delegation call differ from others. Every standard provides a
//! [`StandardStrategy`]; [`create_standard_config`] is the single place that
//! maps an identifier to one.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::compound::CompoundGovernorConfig;
use crate::delegate::{Delegate, DelegateMethod, DelegateWithBalance};
use crate::error::GovernanceError;
use crate::query::Query;

/// Default ordering key for delegate listings.
pub const DEFAULT_ORDER_BY: &str = "delegatedVotes";

/// Paging and filtering for a delegate listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegatesQueryParams {
    pub first: u32,
    pub skip: u32,
    /// Restrict the listing to a single delegate.
    #[serde(default)]
    pub id: Option<String>,
    /// Ordering key; [`DEFAULT_ORDER_BY`] when absent.
    #[serde(default)]
    pub order_by: Option<String>,
}

impl DelegatesQueryParams {
    pub fn page(first: u32, skip: u32) -> Self {
        Self {
            first,
            skip,
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_order_by(mut self, key: impl Into<String>) -> Self {
        self.order_by = Some(key.into());
        self
    }

    pub fn order_key(&self) -> &str {
        self.order_by.as_deref().unwrap_or(DEFAULT_ORDER_BY)
    }
}

/// Per-standard query construction and response normalization.
///
/// Formatters are total over any response produced by the matching query:
/// missing optional values default, only an absent `id` is an error.
pub trait StandardStrategy {
    /// The standard this strategy implements.
    fn standard(&self) -> GovernanceStandard;

    /// Query for a page of delegates plus the governance totals.
    fn delegates_query(&self, params: &DelegatesQueryParams) -> Query;

    /// Normalize a listing response, preserving the indexer's order.
    fn format_delegates_response(&self, response: &Value) -> Result<Vec<Delegate>, GovernanceError>;

    /// Query for one delegate, its holder balance and the governance totals.
    fn delegate_query(&self, id: &str) -> Query;

    /// Normalize a single-delegate response.
    fn format_delegate_response(&self, response: &Value) -> Result<DelegateWithBalance, GovernanceError>;

    /// Zero-activity record for an address the index has never seen.
    fn initialize_user(&self, address: &str) -> Vec<Delegate>;

    /// Static description of the on-chain delegation call.
    fn delegate_method(&self) -> DelegateMethod;
}

/// Supported governance standards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GovernanceStandard {
    CompoundGovernor,
}

impl GovernanceStandard {
    pub const ALL: [GovernanceStandard; 1] = [GovernanceStandard::CompoundGovernor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompoundGovernor => "compound-governor",
        }
    }
}

impl fmt::Display for GovernanceStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GovernanceStandard {
    type Err = GovernanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|standard| standard.as_str() == s)
            .ok_or_else(|| GovernanceError::UnsupportedStandard(s.to_string()))
    }
}

/// A resolved strategy, one variant per [`GovernanceStandard`].
#[derive(Clone, Debug)]
pub enum StandardConfig {
    CompoundGovernor(CompoundGovernorConfig),
}

impl StandardConfig {
    pub fn for_standard(standard: GovernanceStandard) -> Self {
        match standard {
            GovernanceStandard::CompoundGovernor => {
                Self::CompoundGovernor(CompoundGovernorConfig::new())
            }
        }
    }

    fn inner(&self) -> &dyn StandardStrategy {
        match self {
            Self::CompoundGovernor(config) => config,
        }
    }
}

/// Resolve a standard identifier to its strategy.
pub fn create_standard_config(standard: &str) -> Result<StandardConfig, GovernanceError> {
    let standard = standard.parse::<GovernanceStandard>()?;
    tracing::debug!(%standard, "resolved governance standard");
    Ok(StandardConfig::for_standard(standard))
}

impl StandardStrategy for StandardConfig {
    fn standard(&self) -> GovernanceStandard {
        self.inner().standard()
    }

    fn delegates_query(&self, params: &DelegatesQueryParams) -> Query {
        self.inner().delegates_query(params)
    }

    fn format_delegates_response(&self, response: &Value) -> Result<Vec<Delegate>, GovernanceError> {
        self.inner().format_delegates_response(response)
    }

    fn delegate_query(&self, id: &str) -> Query {
        self.inner().delegate_query(id)
    }

    fn format_delegate_response(&self, response: &Value) -> Result<DelegateWithBalance, GovernanceError> {
        self.inner().format_delegate_response(response)
    }

    fn initialize_user(&self, address: &str) -> Vec<Delegate> {
        self.inner().initialize_user(address)
    }

    fn delegate_method(&self) -> DelegateMethod {
        self.inner().delegate_method()
    }
}
