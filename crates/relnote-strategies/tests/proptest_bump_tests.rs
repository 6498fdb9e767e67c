//! Property-based tests for version resolution.
//!
//! These tests verify the behavioral contracts of the semver strategy:
//! - Totality: every commit classifies to exactly one bump level
//! - Dominance: a breaking change always yields a major bump
//! - Order invariance: commit order does not change the next version
//! - Monotonicity: the next version never goes backwards

use proptest::prelude::*;
use relnote_core::{CommitLogEntry, CommitMessage};
use relnote_strategies::{BumpType, SemVerStrategy, VersionStrategy};
use semver::Version;

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Generate commit types, mixing configured and unknown ones
fn commit_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("feat".to_string()),
        Just("fix".to_string()),
        Just("chore".to_string()),
        Just("revert".to_string()),
        "[a-z]{1,8}".prop_map(String::from),
    ]
}

/// Generate a commit log entry
fn commit_strategy() -> impl Strategy<Value = CommitLogEntry> {
    (commit_type_strategy(), any::<bool>()).prop_map(|(commit_type, breaking)| {
        let breaking_message = if breaking { "api changed" } else { "" };
        CommitLogEntry {
            message: CommitMessage::new(commit_type, "", "change", "", "", breaking_message),
            ..Default::default()
        }
    })
}

/// Generate a commit list together with a random permutation of it
fn shuffled_commits_strategy(
) -> impl Strategy<Value = (Vec<CommitLogEntry>, Vec<CommitLogEntry>)> {
    prop::collection::vec(commit_strategy(), 0..12)
        .prop_flat_map(|commits| (Just(commits.clone()), Just(commits).prop_shuffle()))
}

/// Generate a release version
fn version_strategy() -> impl Strategy<Value = Version> {
    (0u64..5, 0u64..20, 0u64..50).prop_map(|(major, minor, patch)| Version::new(major, minor, patch))
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn breaking_commits_always_bump_major(commit_type in commit_type_strategy()) {
        let strategy = SemVerStrategy::default();
        let message = CommitMessage::new(commit_type, "", "change", "", "", "api changed");
        prop_assert_eq!(strategy.classify(&message), BumpType::Major);
    }

    #[test]
    fn aggregate_is_max_of_classifications(commits in prop::collection::vec(commit_strategy(), 0..12)) {
        let strategy = SemVerStrategy::default();
        let expected = commits
            .iter()
            .map(|c| strategy.classify(&c.message))
            .fold(BumpType::None, BumpType::max);
        prop_assert_eq!(strategy.aggregate(&commits), expected);
    }

    #[test]
    fn commit_order_does_not_matter(
        current in version_strategy(),
        (commits, shuffled) in shuffled_commits_strategy(),
    ) {
        let strategy = SemVerStrategy::default();

        prop_assert_eq!(
            strategy.next_version(Some(&current), &commits).unwrap(),
            strategy.next_version(Some(&current), &shuffled).unwrap()
        );
    }

    #[test]
    fn next_version_never_decreases(
        current in version_strategy(),
        commits in prop::collection::vec(commit_strategy(), 0..12),
    ) {
        let strategy = SemVerStrategy::default();
        let decision = strategy.next_version(Some(&current), &commits).unwrap();
        let next = decision.version.clone().unwrap_or_else(|| current.clone());

        prop_assert!(next >= current);
        prop_assert_eq!(decision.updated, decision.bump_type != BumpType::None);
    }

    #[test]
    fn never_resolves_to_zero_zero(
        patch in 0u64..50,
        commits in prop::collection::vec(commit_strategy(), 0..6),
    ) {
        let strategy = SemVerStrategy::default();
        let current = Version::new(0, 0, patch);
        let decision = strategy.next_version(Some(&current), &commits).unwrap();

        let next = decision.version.unwrap_or(current);
        prop_assert!(next.major > 0 || next.minor > 0);
    }
}
