//! Governance data aggregation for Agora.
//!
//! Each on-chain governance standard (today: Compound-style governors) is a
//! [`StandardStrategy`] that builds index queries and normalizes responses into
//! [`Delegate`] records with derived vote and delegator shares.
//! [`DelegateAggregator`] runs those queries through a [`QueryTransport`].

pub mod aggregator;
pub mod compound;
pub mod delegate;
pub mod error;
pub mod query;
pub mod standard;

pub use aggregator::{DelegateAggregator, QueryTransport};
pub use compound::CompoundGovernorConfig;
pub use delegate::{Delegate, DelegateMethod, DelegateWithBalance, GovernanceAggregate};
pub use error::{GovernanceError, TransportError};
pub use query::{Query, Selection};
pub use standard::{
    create_standard_config, DelegatesQueryParams, GovernanceStandard, StandardConfig,
    StandardStrategy, DEFAULT_ORDER_BY,
};
