//! Eligibility filtering for boost campaigns.
//!
//! A boost is kept only if its eligibility type is allowed for the space and
//! its window is `[proposal.end, proposal.end + TWO_WEEKS]` exactly. Anything
//! else is dropped without error.

use agora_types::{Environment, Timestamp, TWO_WEEKS};
use agora_utils::format_duration;
use std::collections::HashMap;
use std::fmt;

use crate::types::{Boost, Proposal};
use crate::whitelist::WhitelistPolicy;

/// Why a boost was dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Bribe-type boosts are disabled for the space.
    BribeDisabled,
    /// `start` or `end` is not a whole number of seconds.
    InvalidWindow,
    /// No proposal with the boost's `strategy.proposal` id was supplied.
    UnknownProposal,
    /// The boost does not start when the proposal's voting ends.
    StartMismatch { start: u64, proposal_end: u64 },
    /// The window is not exactly [`TWO_WEEKS`] long.
    WrongDuration { secs: Option<u64> },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BribeDisabled => write!(f, "bribe boosts are disabled for this space"),
            Self::InvalidWindow => write!(f, "window bounds are not numeric"),
            Self::UnknownProposal => write!(f, "linked proposal not found"),
            Self::StartMismatch { start, proposal_end } => {
                write!(f, "starts at {start}, proposal ends at {proposal_end}")
            }
            Self::WrongDuration { secs: Some(secs) } => write!(
                f,
                "runs {} ({secs}s), expected {}",
                format_duration(*secs),
                format_duration(TWO_WEEKS)
            ),
            Self::WrongDuration { secs: None } => write!(f, "ends before it starts"),
        }
    }
}

/// Filters boosts for one environment against a whitelist policy.
#[derive(Clone, Copy, Debug)]
pub struct BoostSanitizer<'a> {
    policy: &'a WhitelistPolicy,
    env: Environment,
}

impl<'a> BoostSanitizer<'a> {
    pub fn new(policy: &'a WhitelistPolicy, env: Environment) -> Self {
        Self { policy, env }
    }

    /// Sanitizer over the process-wide policy.
    pub fn global(env: Environment) -> BoostSanitizer<'static> {
        BoostSanitizer::new(WhitelistPolicy::global(), env)
    }

    pub fn environment(&self) -> Environment {
        self.env
    }

    pub fn is_whitelisted(&self, space_id: &str) -> bool {
        self.policy.is_whitelisted(self.env, space_id)
    }

    pub fn bribe_disabled(&self, space_id: &str) -> bool {
        self.policy.bribe_disabled(self.env, space_id)
    }

    /// Keep the boosts eligible for display, in input order.
    pub fn sanitize(&self, boosts: &[Boost], proposals: &[Proposal], space_id: &str) -> Vec<Boost> {
        let proposal_ends = proposal_ends(proposals);
        let bribe_disabled = self.bribe_disabled(space_id);

        let kept: Vec<Boost> = boosts
            .iter()
            .filter(|boost| match check(boost, &proposal_ends, bribe_disabled) {
                Ok(()) => true,
                Err(reason) => {
                    tracing::trace!(
                        boost = %boost.id,
                        proposal = %boost.strategy.proposal,
                        space = space_id,
                        "dropping boost: {reason}"
                    );
                    false
                }
            })
            .cloned()
            .collect();

        tracing::debug!(
            env = %self.env,
            space = space_id,
            received = boosts.len(),
            kept = kept.len(),
            "sanitized boosts"
        );
        kept
    }

    /// Check a single boost; `Err` carries the first rule it fails.
    pub fn check(&self, boost: &Boost, proposals: &[Proposal], space_id: &str) -> Result<(), Rejection> {
        check(boost, &proposal_ends(proposals), self.bribe_disabled(space_id))
    }
}

/// Proposal id → voting end. The first proposal with a given id wins.
fn proposal_ends(proposals: &[Proposal]) -> HashMap<&str, u64> {
    let mut ends = HashMap::with_capacity(proposals.len());
    for p in proposals {
        ends.entry(p.id.as_str()).or_insert(p.end);
    }
    ends
}

fn check(boost: &Boost, proposal_ends: &HashMap<&str, u64>, bribe_disabled: bool) -> Result<(), Rejection> {
    if bribe_disabled && boost.is_bribe() {
        return Err(Rejection::BribeDisabled);
    }

    let proposal_end = *proposal_ends
        .get(boost.strategy.proposal.as_str())
        .ok_or(Rejection::UnknownProposal)?;
    let start: Timestamp = boost.start.parse().map_err(|_| Rejection::InvalidWindow)?;
    if start.as_secs() != proposal_end {
        return Err(Rejection::StartMismatch {
            start: start.as_secs(),
            proposal_end,
        });
    }

    let end: Timestamp = boost.end.parse().map_err(|_| Rejection::InvalidWindow)?;
    match start.seconds_until(end) {
        Some(TWO_WEEKS) => Ok(()),
        secs => Err(Rejection::WrongDuration { secs }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoostStrategy, Eligibility, BRIBE};
    use crate::whitelist::WhitelistSetting;
    use serde_json::Map;

    const SPACE: &str = "aave.eth";

    fn boost(id: &str, proposal: &str, start: u64, end: u64, kind: &str) -> Boost {
        Boost {
            id: id.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            strategy: BoostStrategy {
                proposal: proposal.to_string(),
                eligibility: Eligibility {
                    kind: kind.to_string(),
                },
            },
            extra: Map::new(),
        }
    }

    fn proposal(id: &str, end: u64) -> Proposal {
        Proposal {
            id: id.to_string(),
            end,
        }
    }

    fn policy(bribe_disabled: bool) -> WhitelistPolicy {
        WhitelistPolicy::from_entries([(
            Environment::Production,
            SPACE,
            WhitelistSetting { bribe_disabled },
        )])
    }

    #[test]
    fn test_valid_boost_kept() {
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let boosts = vec![boost("1", "p1", 1000, 1000 + TWO_WEEKS, "incentive")];
        let kept = sanitizer.sanitize(&boosts, &[proposal("p1", 1000)], SPACE);
        assert_eq!(kept, boosts);
    }

    #[test]
    fn test_bribe_kept_when_not_disabled() {
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let boosts = vec![boost("1", "p1", 1000, 1000 + TWO_WEEKS, BRIBE)];
        assert_eq!(sanitizer.sanitize(&boosts, &[proposal("p1", 1000)], SPACE).len(), 1);
    }

    #[test]
    fn test_bribe_dropped_when_disabled() {
        let policy = policy(true);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let bribe = boost("1", "p1", 1000, 1000 + TWO_WEEKS, BRIBE);
        let incentive = boost("2", "p1", 1000, 1000 + TWO_WEEKS, "incentive");
        let proposals = [proposal("p1", 1000)];

        let kept = sanitizer.sanitize(&[bribe.clone(), incentive.clone()], &proposals, SPACE);
        assert_eq!(kept, vec![incentive]);
        assert_eq!(
            sanitizer.check(&bribe, &proposals, SPACE),
            Err(Rejection::BribeDisabled)
        );
    }

    #[test]
    fn test_bribe_disable_scoped_to_environment() {
        let policy = policy(true);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Demo);
        let boosts = vec![boost("1", "p1", 1000, 1000 + TWO_WEEKS, BRIBE)];
        assert_eq!(sanitizer.sanitize(&boosts, &[proposal("p1", 1000)], SPACE).len(), 1);
    }

    #[test]
    fn test_unknown_proposal_dropped() {
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let b = boost("1", "missing", 1000, 1000 + TWO_WEEKS, "incentive");
        let proposals = [proposal("p1", 1000)];
        assert!(sanitizer.sanitize(&[b.clone()], &proposals, SPACE).is_empty());
        assert_eq!(sanitizer.check(&b, &proposals, SPACE), Err(Rejection::UnknownProposal));
    }

    #[test]
    fn test_start_mismatch_dropped() {
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let b = boost("1", "p1", 999, 999 + TWO_WEEKS, "incentive");
        assert_eq!(
            sanitizer.check(&b, &[proposal("p1", 1000)], SPACE),
            Err(Rejection::StartMismatch {
                start: 999,
                proposal_end: 1000
            })
        );
    }

    #[test]
    fn test_one_second_too_long_dropped() {
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let b = boost("1", "p1", 1000, 1000 + TWO_WEEKS + 1, "incentive");
        assert!(sanitizer.sanitize(&[b.clone()], &[proposal("p1", 1000)], SPACE).is_empty());
        assert_eq!(
            sanitizer.check(&b, &[proposal("p1", 1000)], SPACE),
            Err(Rejection::WrongDuration {
                secs: Some(TWO_WEEKS + 1)
            })
        );
    }

    #[test]
    fn test_end_before_start_dropped() {
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let b = boost("1", "p1", 1000, 10, "incentive");
        assert_eq!(
            sanitizer.check(&b, &[proposal("p1", 1000)], SPACE),
            Err(Rejection::WrongDuration { secs: None })
        );
    }

    #[test]
    fn test_non_numeric_window_dropped() {
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let mut b = boost("1", "p1", 1000, 1000 + TWO_WEEKS, "incentive");
        b.start = "soon".to_string();
        assert_eq!(
            sanitizer.check(&b, &[proposal("p1", 1000)], SPACE),
            Err(Rejection::InvalidWindow)
        );
    }

    #[test]
    fn test_decimal_window_kept() {
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let mut b = boost("1", "p1", 0, 0, "incentive");
        b.start = "1000.0".to_string();
        b.end = "1210600.0".to_string();
        assert_eq!(sanitizer.check(&b, &[proposal("p1", 1000)], SPACE), Ok(()));
        assert_eq!(sanitizer.sanitize(&[b.clone()], &[proposal("p1", 1000)], SPACE), vec![b]);
    }

    #[test]
    fn test_fractional_window_dropped() {
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let mut b = boost("1", "p1", 1000, 1000 + TWO_WEEKS, "incentive");
        b.start = "1000.5".to_string();
        assert_eq!(
            sanitizer.check(&b, &[proposal("p1", 1000)], SPACE),
            Err(Rejection::InvalidWindow)
        );
    }

    #[test]
    fn test_order_preserved() {
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let proposals = [proposal("p1", 1000), proposal("p2", 5000)];
        let boosts = vec![
            boost("a", "p2", 5000, 5000 + TWO_WEEKS, "incentive"),
            boost("b", "p1", 1, 2, "incentive"),
            boost("c", "p1", 1000, 1000 + TWO_WEEKS, "incentive"),
            boost("d", "p3", 1000, 1000 + TWO_WEEKS, "incentive"),
            boost("e", "p2", 5000, 5000 + TWO_WEEKS, BRIBE),
        ];
        let ids: Vec<String> = sanitizer
            .sanitize(&boosts, &proposals, SPACE)
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec!["a", "c", "e"]);
    }

    #[test]
    fn test_first_duplicate_proposal_wins() {
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let b = boost("1", "p1", 1000, 1000 + TWO_WEEKS, "incentive");
        let proposals = [proposal("p1", 1000), proposal("p1", 2000)];
        assert_eq!(sanitizer.check(&b, &proposals, SPACE), Ok(()));
    }

    #[test]
    fn test_unlisted_space_only_applies_window_rules() {
        let policy = WhitelistPolicy::default();
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        assert!(!sanitizer.is_whitelisted(SPACE));
        assert!(!sanitizer.bribe_disabled(SPACE));
        let boosts = vec![boost("1", "p1", 1000, 1000 + TWO_WEEKS, BRIBE)];
        assert_eq!(sanitizer.sanitize(&boosts, &[proposal("p1", 1000)], SPACE).len(), 1);
    }

    #[test]
    fn test_rejection_display() {
        let reason = Rejection::WrongDuration { secs: Some(86_400) };
        assert_eq!(reason.to_string(), "runs 1d 0h (86400s), expected 14d 0h");
    }
}
