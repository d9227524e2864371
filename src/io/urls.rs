use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::{ResumeDocument, ResumeSchema, ValueType};

static HANDLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,98}[A-Za-z0-9])?$")
        .expect("handle pattern is valid")
});

const WRAPPING: &[char] = &['(', ')', '[', ']', '{', '}', '<', '>', '"', '\''];

const PROFILE_SECTION: &str = "personal-information";

/// Normalise one URL-typed value the way it is stored.
///
/// Returns an empty string when the input cannot be turned into something
/// with an http(s) scheme and a dotted host.
pub fn normalize_url(section_key: &str, field_key: &str, value: &str) -> String {
    let candidate = value.trim().trim_matches(WRAPPING).trim();
    if candidate.is_empty() {
        return String::new();
    }
    let normalized = if has_http_scheme(candidate) {
        candidate.to_string()
    } else if let Some(url) = expand_handle(section_key, field_key, candidate) {
        url
    } else {
        format!("https://{candidate}")
    };
    if is_plausible_url(&normalized) {
        normalized
    } else {
        String::new()
    }
}

/// Rewrite every non-empty URL field of the document in place. Returns the
/// number of values that changed.
pub fn normalize_url_fields(document: &mut ResumeDocument, schema: &ResumeSchema) -> usize {
    let mut changed = 0;
    for section in document.sections_mut() {
        let Some(section_schema) = schema.section(section.key()) else {
            continue;
        };
        let url_fields: Vec<&str> = section_schema
            .fields
            .iter()
            .filter(|field| field.value_type == ValueType::Url)
            .map(|field| field.key.as_str())
            .collect();
        if url_fields.is_empty() {
            continue;
        }
        let section_key = section.key().to_string();
        for entry in section.entries_mut() {
            for &field_key in &url_fields {
                let Some(value) = entry.values_mut().get_mut(field_key) else {
                    continue;
                };
                if value.trim().is_empty() {
                    continue;
                }
                let normalized = normalize_url(&section_key, field_key, value);
                if *value != normalized {
                    debug!(section = %section_key, field = field_key, "url value normalised");
                    *value = normalized;
                    changed += 1;
                }
            }
        }
    }
    changed
}

fn expand_handle(section_key: &str, field_key: &str, candidate: &str) -> Option<String> {
    if section_key != PROFILE_SECTION {
        return None;
    }
    let base = match field_key {
        "github" => "https://github.com/",
        "linkedin" => "https://linkedin.com/in/",
        _ => return None,
    };
    let handle = candidate.trim_start_matches('@').trim();
    HANDLE.is_match(handle).then(|| format!("{base}{handle}"))
}

fn has_http_scheme(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn is_plausible_url(value: &str) -> bool {
    let Some((_, rest)) = value.split_once("://") else {
        return false;
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if authority.is_empty() {
        return false;
    }
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::FieldAddress, schema::builtin_schema};

    #[test]
    fn expands_profile_handles() {
        assert_eq!(
            normalize_url("personal-information", "github", "@octocat"),
            "https://github.com/octocat"
        );
        assert_eq!(
            normalize_url("personal-information", "linkedin", " jane-doe "),
            "https://linkedin.com/in/jane-doe"
        );
        assert_eq!(
            normalize_url("portfolio", "url", "octocat"),
            "",
            "handles only expand on profile fields"
        );
    }

    #[test]
    fn keeps_schemes_and_prefixes_bare_hosts() {
        assert_eq!(
            normalize_url("portfolio", "url", "<HTTP://Example.com/a>"),
            "HTTP://Example.com/a"
        );
        assert_eq!(normalize_url("portfolio", "url", "example.com"), "https://example.com");
        assert_eq!(normalize_url("portfolio", "url", "https://localhost:8080"), "");
        assert_eq!(normalize_url("portfolio", "url", "\"\""), "");
    }

    #[test]
    fn rewrites_only_url_fields() {
        let schema = builtin_schema().unwrap();
        let mut doc = ResumeDocument::empty(&schema);
        let id = doc
            .add_entry(&schema, "personal-information")
            .unwrap()
            .entry_id()
            .cloned()
            .unwrap();
        for (field, value) in [("github", "@octocat"), ("first-name", "octocat"), ("linkedin", "")] {
            doc.set_field_value(
                &schema,
                &FieldAddress::new("personal-information", &id, field),
                value,
            )
            .unwrap();
        }
        assert_eq!(normalize_url_fields(&mut doc, &schema), 1);
        let address = |field| FieldAddress::new("personal-information", &id, field);
        assert_eq!(doc.field_value(&address("github")), Some("https://github.com/octocat"));
        assert_eq!(doc.field_value(&address("first-name")), Some("octocat"));
        assert_eq!(doc.field_value(&address("linkedin")), Some(""));
    }
}
