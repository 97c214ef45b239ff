//! Property-based tests for the password-policy compiler.

use fancy_regex::Regex;
use pingone_api::{compile_password_pattern, LengthRange, PasswordPolicy};
use proptest::prelude::*;
use std::collections::BTreeMap;

// Character classes as the server sends them: ranges, enumerations, and the
// punctuation class, which is full of regex metacharacters.
fn character_class_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a-z".to_string()),
        Just("A-Z".to_string()),
        Just("0-9".to_string()),
        Just("~!@#$%^&*()-_=+[]".to_string()),
        "[a-zA-Z0-9.$^{}()|]{1,6}",
    ]
}

fn policy_strategy() -> impl Strategy<Value = PasswordPolicy> {
    (
        prop::collection::btree_map(character_class_strategy(), 1u32..4, 1..4),
        1u32..6,
        (1u32..16, 0u32..48),
    )
        .prop_map(|(min_characters, max_repeated, (min, extra))| PasswordPolicy {
            is_default: true,
            min_characters: Some(min_characters),
            max_repeated_characters: Some(max_repeated),
            length: Some(LengthRange {
                min,
                max: min + extra,
            }),
            name: "Standard".to_string(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Compilation is referentially transparent: the same policy list always
    /// yields a byte-identical pattern.
    #[test]
    fn prop_compile_is_idempotent(policy in policy_strategy()) {
        let policies = vec![policy];
        let first = compile_password_pattern(&policies);
        let second = compile_password_pattern(&policies);
        prop_assert_eq!(first, second);
    }

    /// Every compiled pattern is a valid regex for a backtracking engine,
    /// even when character classes contain metacharacters.
    #[test]
    fn prop_compiled_pattern_parses(policy in policy_strategy()) {
        let pattern = compile_password_pattern(&[policy]).unwrap();
        prop_assert!(Regex::new(&pattern).is_ok(), "failed to parse: {}", pattern);
    }

    /// The pattern anchors the whole candidate string.
    #[test]
    fn prop_pattern_is_anchored(policy in policy_strategy()) {
        let pattern = compile_password_pattern(&[policy]).unwrap();
        prop_assert!(pattern.starts_with("^(?:"));
        prop_assert!(pattern.ends_with('$'));
    }

    /// A candidate longer than the maximum length never matches.
    #[test]
    fn prop_overlong_candidate_rejected(policy in policy_strategy()) {
        let max = policy.length.unwrap().max;
        let pattern = compile_password_pattern(&[policy]).unwrap();
        let candidate = "ab".repeat(max as usize + 1);
        let re = Regex::new(&pattern).unwrap();
        prop_assert!(!re.is_match(&candidate).unwrap());
    }
}
