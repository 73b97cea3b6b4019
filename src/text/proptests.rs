//! Property-based tests for the text normalizer.

use super::normalize;
use proptest::prelude::*;

const TRACKED_ACCENTS: &str = "áàäâéèëêíìïîóòöôúùüûñ";

proptest! {
    /// Normalizing twice never changes the result again.
    #[test]
    fn normalize_is_idempotent(input in ".*") {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    /// No tracked accented character survives normalization.
    #[test]
    fn normalize_strips_tracked_accents(input in ".*") {
        let folded = normalize(&input);
        prop_assert!(!folded.chars().any(|c| TRACKED_ACCENTS.contains(c)));
    }

    /// Plain lowercase ASCII passes through untouched.
    #[test]
    fn normalize_preserves_plain_ascii(input in "[a-z0-9 ?!.,'-]*") {
        prop_assert_eq!(normalize(&input), input);
    }
}
