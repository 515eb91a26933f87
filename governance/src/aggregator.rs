//! Delegate aggregation over a pluggable query transport.

use async_trait::async_trait;
use serde_json::Value;

use crate::delegate::{Delegate, DelegateMethod, DelegateWithBalance};
use crate::error::{GovernanceError, TransportError};
use crate::query::Query;
use crate::standard::{create_standard_config, DelegatesQueryParams, StandardConfig, StandardStrategy};

/// Executes a [`Query`] against some index and returns its raw data object.
///
/// Implementations own everything about the wire: encoding, endpoints,
/// timeouts and retries.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    async fn execute(&self, query: &Query) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: QueryTransport + ?Sized> QueryTransport for &T {
    async fn execute(&self, query: &Query) -> Result<Value, TransportError> {
        (**self).execute(query).await
    }
}

/// Builds queries with a standard's strategy, runs them through the transport
/// and returns normalized records.
///
/// Holds no state beyond its collaborators; every call starts from a fresh
/// response.
pub struct DelegateAggregator<T> {
    strategy: StandardConfig,
    transport: T,
}

impl<T: QueryTransport> DelegateAggregator<T> {
    /// Resolve `standard` and wrap `transport`.
    pub fn new(standard: &str, transport: T) -> Result<Self, GovernanceError> {
        Ok(Self::with_strategy(create_standard_config(standard)?, transport))
    }

    pub fn with_strategy(strategy: StandardConfig, transport: T) -> Self {
        Self { strategy, transport }
    }

    pub fn strategy(&self) -> &StandardConfig {
        &self.strategy
    }

    /// Fetch one page of delegates.
    pub async fn delegates(&self, params: &DelegatesQueryParams) -> Result<Vec<Delegate>, GovernanceError> {
        let query = self.strategy.delegates_query(params);
        tracing::debug!(
            standard = %self.strategy.standard(),
            first = params.first,
            skip = params.skip,
            order_by = params.order_key(),
            "fetching delegates"
        );
        let response = self.transport.execute(&query).await?;
        self.strategy.format_delegates_response(&response)
    }

    /// Fetch a single delegate's detail record.
    pub async fn delegate(&self, id: &str) -> Result<DelegateWithBalance, GovernanceError> {
        let response = self.fetch_delegate(id).await?;
        self.strategy.format_delegate_response(&response)
    }

    /// Like [`delegate`](Self::delegate), but an address the index has no
    /// delegate record for yields its zero-activity seed record instead of an
    /// error.
    pub async fn delegate_or_initialize(&self, id: &str) -> Result<DelegateWithBalance, GovernanceError> {
        let response = self.fetch_delegate(id).await?;
        // Only a null or absent entity means "unknown"; an entity without an
        // id is still a formatting error.
        if response.get("delegate").map_or(true, Value::is_null) {
            tracing::debug!(id, "no delegate record, using seed record");
            return self
                .strategy
                .initialize_user(id)
                .into_iter()
                .next()
                .map(DelegateWithBalance::from)
                .ok_or(GovernanceError::MissingField("delegate.id"));
        }
        self.strategy.format_delegate_response(&response)
    }

    /// A listing page for `address`: its indexed record when one exists,
    /// otherwise the seed record.
    pub async fn delegates_or_initialize(&self, address: &str) -> Result<Vec<Delegate>, GovernanceError> {
        let params = DelegatesQueryParams::page(1, 0).with_id(address);
        let records = self.delegates(&params).await?;
        if records.is_empty() {
            return Ok(self.strategy.initialize_user(address));
        }
        Ok(records)
    }

    pub fn delegate_method(&self) -> DelegateMethod {
        self.strategy.delegate_method()
    }

    async fn fetch_delegate(&self, id: &str) -> Result<Value, GovernanceError> {
        let query = self.strategy.delegate_query(id);
        tracing::debug!(standard = %self.strategy.standard(), id, "fetching delegate");
        Ok(self.transport.execute(&query).await?)
    }
}
