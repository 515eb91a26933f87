//! Compound-style governor (`compound-governor`).
//!
//! The subgraph exposes `delegates`, `delegate(id)`, `tokenHolder(id)` and a
//! singleton `governance(id: "GOVERNANCE")` entity holding protocol totals.
//! Votes and totals are BigInt strings; `tokenHoldersRepresentedAmount` is an
//! Int.

use serde_json::Value;

use crate::delegate::{
    decimal_field, integer_field, string_field, Delegate, DelegateMethod, DelegateWithBalance,
    GovernanceAggregate,
};
use crate::error::GovernanceError;
use crate::query::{Query, Selection};
use crate::standard::{DelegatesQueryParams, GovernanceStandard, StandardStrategy};

/// Entity id of the governance totals singleton.
const GOVERNANCE_ENTITY_ID: &str = "GOVERNANCE";

const DELEGATE_FIELDS: &[&str] = &["id", "delegatedVotes", "tokenHoldersRepresentedAmount"];
const TOKEN_HOLDER_FIELDS: &[&str] = &["id", "tokenBalance"];
const GOVERNANCE_FIELDS: &[&str] = &["delegatedVotes", "totalTokenHolders", "totalDelegates"];

const DELEGATE_ABI: &str = "function delegate(address delegatee)";
const DELEGATE_ACTION: &str = "delegate";

#[derive(Clone, Debug, Default)]
pub struct CompoundGovernorConfig;

impl CompoundGovernorConfig {
    pub fn new() -> Self {
        Self
    }

    fn governance_selection() -> Selection {
        Selection::new("governance")
            .with_arg("id", GOVERNANCE_ENTITY_ID)
            .with_fields(GOVERNANCE_FIELDS)
    }

    /// Normalize one delegate object against the response's totals.
    fn delegate_record(
        raw: &Value,
        governance: &GovernanceAggregate,
        id_path: &'static str,
    ) -> Result<Delegate, GovernanceError> {
        let id = string_field(raw, "id").ok_or(GovernanceError::MissingField(id_path))?;
        let delegated_votes = decimal_field(raw, "delegatedVotes")
            .filter(|votes| !votes.is_empty())
            .unwrap_or_else(|| "0".to_string());
        let represented = integer_field(raw, "tokenHoldersRepresentedAmount").unwrap_or(0);

        Ok(Delegate {
            delegators_percentage: governance.delegators_share(represented),
            votes_percentage: governance.votes_share(&delegated_votes),
            statement: string_field(raw, "statement").unwrap_or_default(),
            id,
            delegated_votes,
            token_holders_represented_amount: represented,
        })
    }
}

impl StandardStrategy for CompoundGovernorConfig {
    fn standard(&self) -> GovernanceStandard {
        GovernanceStandard::CompoundGovernor
    }

    fn delegates_query(&self, params: &DelegatesQueryParams) -> Query {
        let filter = match &params.id {
            Some(id) => serde_json::json!({ "id": id }),
            None => serde_json::json!({}),
        };

        Query::new()
            .with_selection(
                Selection::new("delegates")
                    .with_arg("first", params.first)
                    .with_arg("skip", params.skip)
                    .with_arg("orderBy", params.order_key())
                    .with_arg("orderDirection", "desc")
                    .with_arg("where", filter)
                    .with_fields(DELEGATE_FIELDS),
            )
            .with_selection(Self::governance_selection())
    }

    fn format_delegates_response(&self, response: &Value) -> Result<Vec<Delegate>, GovernanceError> {
        let governance = GovernanceAggregate::from_value(response.get("governance"));

        let delegates = match response.get("delegates") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(GovernanceError::MalformedResponse(
                    "`delegates` is not a list".to_string(),
                ))
            }
        };

        let records = delegates
            .iter()
            .map(|raw| Self::delegate_record(raw, &governance, "delegates[].id"))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            count = records.len(),
            total_token_holders = %governance.total_token_holders,
            "formatted delegate listing"
        );
        Ok(records)
    }

    fn delegate_query(&self, id: &str) -> Query {
        Query::new()
            .with_selection(
                Selection::new("delegate")
                    .with_arg("id", id)
                    .with_fields(DELEGATE_FIELDS),
            )
            .with_selection(
                Selection::new("tokenHolder")
                    .with_arg("id", id)
                    .with_fields(TOKEN_HOLDER_FIELDS),
            )
            .with_selection(Self::governance_selection())
    }

    fn format_delegate_response(&self, response: &Value) -> Result<DelegateWithBalance, GovernanceError> {
        let governance = GovernanceAggregate::from_value(response.get("governance"));
        let raw = response
            .get("delegate")
            .filter(|d| d.is_object())
            .ok_or(GovernanceError::MissingField("delegate.id"))?;
        let delegate = Self::delegate_record(raw, &governance, "delegate.id")?;

        let token_balance = response
            .get("tokenHolder")
            .and_then(|holder| decimal_field(holder, "tokenBalance"))
            .filter(|balance| !balance.is_empty())
            .unwrap_or_else(|| "0".to_string());

        Ok(DelegateWithBalance {
            token_balance,
            ..DelegateWithBalance::from(delegate)
        })
    }

    fn initialize_user(&self, address: &str) -> Vec<Delegate> {
        vec![Delegate {
            id: address.to_string(),
            delegated_votes: "0".to_string(),
            token_holders_represented_amount: 0,
            delegators_percentage: 0.0,
            votes_percentage: 0.0,
            statement: String::new(),
        }]
    }

    fn delegate_method(&self) -> DelegateMethod {
        DelegateMethod {
            abi: vec![DELEGATE_ABI.to_string()],
            action: DELEGATE_ACTION.to_string(),
        }
    }
}
