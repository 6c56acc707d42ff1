//! Display-only redaction of secret values.

/// Placeholder shown for short secrets so their length is not revealed.
pub const SHORT_PLACEHOLDER: &str = "••••••••";

/// Secrets at or below this many characters are fully hidden.
const SHORT_LIMIT: usize = 8;

/// Mask a secret for display.
///
/// - empty (or whitespace-only) input gives an empty string
/// - up to 8 characters gives [`SHORT_PLACEHOLDER`]
/// - anything longer gives the first and last 4 characters around `...`
///
/// Works on characters, not bytes, so multi-byte values never split.
pub fn mask(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= SHORT_LIMIT {
        return SHORT_PLACEHOLDER.to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
