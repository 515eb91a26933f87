//! Boost campaigns: space whitelist policy and eligibility filtering.
//!
//! A boost is an incentive campaign attached to a proposal. It is only shown
//! when its space is whitelisted for the current [`Environment`], its
//! eligibility type is not disabled for that space, and its window starts
//! exactly when the proposal's voting ends and lasts exactly [`TWO_WEEKS`].
//!
//! [`Environment`]: agora_types::Environment
//! [`TWO_WEEKS`]: agora_types::TWO_WEEKS

pub mod error;
pub mod sanitizer;
pub mod types;
pub mod whitelist;

pub use error::BoostError;
pub use sanitizer::{BoostSanitizer, Rejection};
pub use types::{Boost, BoostStrategy, Eligibility, Proposal, BRIBE};
pub use whitelist::{WhitelistPolicy, WhitelistSetting};
