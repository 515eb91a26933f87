use proptest::prelude::*;
use serde_json::Map;

use agora_boost::{
    Boost, BoostSanitizer, BoostStrategy, Eligibility, Proposal, WhitelistPolicy,
    WhitelistSetting, BRIBE,
};
use agora_types::{Environment, TWO_WEEKS};

const SPACE: &str = "space.eth";

fn boost(id: usize, proposal: &str, start: u64, end: u64, kind: &str) -> Boost {
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

fn policy(bribe_disabled: bool) -> WhitelistPolicy {
    WhitelistPolicy::from_entries([(
        Environment::Production,
        SPACE,
        WhitelistSetting { bribe_disabled },
    )])
}

/// (proposal index, start offset from proposal end, duration, is bribe)
fn boost_case() -> impl Strategy<Value = (usize, i64, u64, bool)> {
    (
        0usize..4,
        prop_oneof![Just(0i64), -5i64..5],
        prop_oneof![Just(TWO_WEEKS), TWO_WEEKS - 2..TWO_WEEKS + 2, 0u64..100],
        any::<bool>(),
    )
}

proptest! {
    /// Output is an order-preserving subsequence of the input.
    #[test]
    fn sanitize_preserves_order(
        cases in prop::collection::vec(boost_case(), 0..40),
        bribe_disabled in any::<bool>(),
    ) {
        // Proposals p0..p2 exist; p3 never does.
        let proposals: Vec<Proposal> = (0..3)
            .map(|i| Proposal { id: format!("p{i}"), end: 10_000 + i as u64 * 1_000 })
            .collect();
        let boosts: Vec<Boost> = cases
            .iter()
            .enumerate()
            .map(|(i, (p, offset, duration, bribe))| {
                let base = 10_000 + *p as i64 * 1_000;
                let start = (base + offset) as u64;
                let kind = if *bribe { BRIBE } else { "incentive" };
                boost(i, &format!("p{p}"), start, start + duration, kind)
            })
            .collect();

        let policy = policy(bribe_disabled);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let kept = sanitizer.sanitize(&boosts, &proposals, SPACE);

        let indices: Vec<usize> = kept.iter().map(|b| b.id.parse().unwrap()).collect();
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        for b in &kept {
            prop_assert_eq!(b, &boosts[b.id.parse::<usize>().unwrap()]);
        }

        // Kept iff every rule holds.
        for (i, (p, offset, duration, bribe)) in cases.iter().enumerate() {
            let eligible = *p < 3
                && *offset == 0
                && *duration == TWO_WEEKS
                && !(bribe_disabled && *bribe);
            prop_assert_eq!(indices.contains(&i), eligible);
        }
    }

    /// Any window length other than two weeks is rejected.
    #[test]
    fn sanitize_rejects_other_durations(start in 0u64..1_000_000_000, duration in 0u64..10_000_000) {
        prop_assume!(duration != TWO_WEEKS);
        let policy = policy(false);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let proposals = vec![Proposal { id: "p".to_string(), end: start }];
        let kept = sanitizer.sanitize(&[boost(0, "p", start, start + duration, "incentive")], &proposals, SPACE);
        prop_assert!(kept.is_empty());
    }

    /// Sanitizing is idempotent.
    #[test]
    fn sanitize_idempotent(cases in prop::collection::vec(boost_case(), 0..20)) {
        let proposals = vec![Proposal { id: "p0".to_string(), end: 10_000 }];
        let boosts: Vec<Boost> = cases
            .iter()
            .enumerate()
            .map(|(i, (_, offset, duration, bribe))| {
                let start = (10_000 + offset) as u64;
                let kind = if *bribe { BRIBE } else { "incentive" };
                boost(i, "p0", start, start + duration, kind)
            })
            .collect();
        let policy = policy(true);
        let sanitizer = BoostSanitizer::new(&policy, Environment::Production);
        let once = sanitizer.sanitize(&boosts, &proposals, SPACE);
        let twice = sanitizer.sanitize(&once, &proposals, SPACE);
        prop_assert_eq!(once, twice);
    }
}
