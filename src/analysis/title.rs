use std::borrow::Cow;

use indexmap::IndexMap;
use unicode_width::UnicodeWidthChar;

use crate::domain::SectionSchema;

const ELLIPSIS: char = '…';

/// Display label for an entry: the trimmed primary field value, or
/// `"<Section title> entry"` when that is empty.
///
/// Only the primary field is consulted, so editing any other field never
/// changes the label.
pub fn entry_title(section: &SectionSchema, values: &IndexMap<String, String>) -> String {
    section
        .primary_field()
        .and_then(|field| values.get(&field.key))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| section.fallback_entry_title())
}

/// Fit a title into `max_width` terminal columns, cutting on a character
/// boundary and ending with an ellipsis when something was dropped.
pub fn truncate_title(title: &str, max_width: usize) -> Cow<'_, str> {
    let total: usize = title.chars().map(char_width).sum();
    if total <= max_width {
        return Cow::Borrowed(title);
    }
    if max_width == 0 {
        return Cow::Owned(String::new());
    }
    let budget = max_width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in title.chars() {
        let width = char_width(ch);
        if used + width > budget {
            break;
        }
        used += width;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    Cow::Owned(out)
}

fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}
