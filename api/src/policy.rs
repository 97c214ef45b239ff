//! Password policy documents and the policy-to-regex compiler.
//!
//! The server describes password complexity as a policy document; the
//! compiler folds it into a single pattern suitable for client-side
//! pre-validation. The pattern targets backtracking regex engines (it uses
//! lookarounds and a backreference), matching what browser and mobile
//! consumers evaluate.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Inclusive password length bounds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LengthRange {
    /// Minimum length
    pub min: u32,
    /// Maximum length
    pub max: u32,
}

/// A password policy as returned by the `passwordPolicies` endpoint.
///
/// Every complexity field is optional on the wire; policies describing only
/// history or lockout rules omit them entirely.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordPolicy {
    /// Whether this is the environment's default policy
    #[serde(default, rename = "default")]
    pub is_default: bool,
    /// Minimum occurrences required per character class, keyed by the class
    /// content (e.g. `"a-z"`, `"0-9"`, `"~!@#$%^&*()-_=+[]"`)
    #[serde(default)]
    pub min_characters: Option<BTreeMap<String, u32>>,
    /// Maximum allowed consecutive repetitions of a single character
    #[serde(default)]
    pub max_repeated_characters: Option<u32>,
    /// Length bounds
    #[serde(default)]
    pub length: Option<LengthRange>,
    /// Policy display name
    #[serde(default)]
    pub name: String,
}

/// Select the applicable policy and compile it into a validation pattern.
///
/// Selection order: the first policy flagged default with both
/// `minCharacters` and `maxRepeatedCharacters` populated, then the first
/// policy named `"Standard"`. `None` when neither exists or the selected
/// policy is missing a complexity field — absence of a policy is not an
/// error.
///
/// The compiled pattern anchors the whole string: one positive lookahead per
/// character class, a negative lookahead bounding consecutive repeats, and a
/// length constraint. Character classes iterate in sorted order, so the same
/// input always compiles to a byte-identical pattern.
#[must_use]
pub fn compile_password_pattern(policies: &[PasswordPolicy]) -> Option<String> {
    let policy = policies
        .iter()
        .find(|p| {
            p.is_default && p.min_characters.is_some() && p.max_repeated_characters.is_some()
        })
        .or_else(|| policies.iter().find(|p| p.name == "Standard"))?;

    let min_characters = policy.min_characters.as_ref()?;
    let max_repeated = policy.max_repeated_characters?;
    let length = policy.length?;

    let mut pattern = String::from("^(?:");
    for (class, count) in min_characters {
        pattern.push_str(&format!(
            "(?=(?:.*[{}]){{{count},}})",
            escape_character_class(class)
        ));
    }
    pattern.push(')');
    pattern.push_str(&format!("(?!.*(.)\\1{{{max_repeated},}})"));
    pattern.push_str(&format!(".{{{},{}}}$", length.min, length.max));

    Some(pattern)
}

/// Escape regex metacharacters inside a character-class string so the
/// compiled pattern matches them literally.
fn escape_character_class(class: &str) -> String {
    let mut escaped = String::with_capacity(class.len());
    for c in class.chars() {
        if matches!(
            c,
            '.' | '*' | '+' | '?' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '[' | ']' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
