use std::sync::LazyLock;

use regex::Regex;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("separator pattern is valid"));

/// Normalise a human title before slugging: lowercase, `&` spelled out, `/` as a space.
pub fn to_key(value: &str) -> String {
    value
        .to_lowercase()
        .replace('&', "and")
        .replace('/', " ")
        .trim()
        .to_string()
}

/// Collapse every run of non-alphanumeric characters into a single `-`.
pub fn slugify(value: &str) -> String {
    SEPARATORS
        .replace_all(&value.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Stable storage key for a section title or field label.
pub fn derive_key(title: &str) -> String {
    slugify(&to_key(title))
}
