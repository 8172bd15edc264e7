//! Deterministic derivations from sampled names: slugs and mail nicknames

use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid slug regex"));
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s-]+").expect("valid separator regex"));
static INVALID_NICKNAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]").expect("valid nickname regex"));

/// URL-safe slug of at most `max_len` characters
///
/// Lower-cases, drops everything except ASCII letters, digits, whitespace and
/// hyphens, truncates, then joins the remaining words with single hyphens.
pub fn generate_slug(name: &str, max_len: usize) -> String {
    let lowered = name.to_lowercase();
    let cleaned = INVALID_SLUG_CHARS.replace_all(&lowered, "");
    let spaced = SEPARATORS.replace_all(cleaned.trim(), " ");

    let truncated: String = spaced.chars().take(max_len).collect();
    truncated.trim().replace(' ', "-")
}

/// `first.last`, lower-cased
pub fn user_mail_nickname(first_name: &str, last_name: &str) -> String {
    format!("{}.{}", first_name.to_lowercase(), last_name.to_lowercase())
}

/// Display name reduced to lower-case letters and digits
pub fn group_mail_nickname(display_name: &str) -> String {
    INVALID_NICKNAME_CHARS
        .replace_all(&display_name.to_lowercase(), "")
        .into_owned()
}
