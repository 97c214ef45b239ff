//! Behavioral tests for compiled password patterns.
//!
//! Patterns are evaluated with a backtracking engine, matching how browser
//! consumers run them.

use fancy_regex::Regex;
use pingone_api::{compile_password_pattern, LengthRange, PasswordPolicy};
use std::collections::BTreeMap;

fn standard_policy(
    classes: &[(&str, u32)],
    max_repeated: u32,
    min: u32,
    max: u32,
) -> PasswordPolicy {
    PasswordPolicy {
        is_default: true,
        min_characters: Some(
            classes
                .iter()
                .map(|(c, n)| ((*c).to_string(), *n))
                .collect::<BTreeMap<_, _>>(),
        ),
        max_repeated_characters: Some(max_repeated),
        length: Some(LengthRange { min, max }),
        name: "Standard".to_string(),
    }
}

fn matches(pattern: &str, candidate: &str) -> bool {
    Regex::new(pattern).unwrap().is_match(candidate).unwrap()
}

#[test]
fn lowercase_and_digit_policy_accepts_and_rejects() {
    let policies = vec![standard_policy(&[("a-z", 1), ("0-9", 1)], 2, 8, 64)];
    let pattern = compile_password_pattern(&policies).unwrap();

    // No lowercase, no digit, and an 8-character run of the same character.
    assert!(!matches(&pattern, "AAAAAAAA"));
    assert!(matches(&pattern, "abc123de"));
}

#[test]
fn repeated_character_runs_are_bounded() {
    let policies = vec![standard_policy(&[("a-z", 1)], 2, 8, 64)];
    let pattern = compile_password_pattern(&policies).unwrap();

    // Runs of two are fine, runs of three are not.
    assert!(matches(&pattern, "aabbcc11"));
    assert!(!matches(&pattern, "aaabbc11"));
}

#[test]
fn length_bounds_are_enforced() {
    let policies = vec![standard_policy(&[("a-z", 1)], 4, 8, 10)];
    let pattern = compile_password_pattern(&policies).unwrap();

    assert!(!matches(&pattern, "abcdefg"));
    assert!(matches(&pattern, "abcdefgh"));
    assert!(matches(&pattern, "abcdefghij"));
    assert!(!matches(&pattern, "abcdefghijk"));
}

#[test]
fn metacharacter_class_matches_literally() {
    // A class of "." must require a literal dot, not "any character".
    let policies = vec![standard_policy(&[(".", 1)], 4, 8, 64)];
    let pattern = compile_password_pattern(&policies).unwrap();

    assert!(!matches(&pattern, "abcdefgh"));
    assert!(matches(&pattern, "abc.efgh"));
}

#[test]
fn minimum_count_requires_multiple_occurrences() {
    let policies = vec![standard_policy(&[("0-9", 2)], 4, 8, 64)];
    let pattern = compile_password_pattern(&policies).unwrap();

    assert!(!matches(&pattern, "abcdefg1"));
    assert!(matches(&pattern, "abcdef12"));
}
