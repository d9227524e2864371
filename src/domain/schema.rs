use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::SchemaError;

/// Whether a section holds at most one entry or an ordered list of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryCardinality {
    #[serde(rename = "single")]
    One,
    #[serde(rename = "multiple")]
    Many,
}

impl EntryCardinality {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "single" | "one" => Some(Self::One),
            "multiple" | "many" => Some(Self::Many),
            _ => None,
        }
    }

    pub fn allows(self, count: usize) -> bool {
        match self {
            Self::One => count <= 1,
            Self::Many => true,
        }
    }
}

/// How a field value should be edited. The stored value is always a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    PlainText,
    RichText,
    Date,
    Number,
    Url,
}

impl ValueType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" | "string" | "plain_text" => Some(Self::PlainText),
            "rich_text" | "richtext" | "html" => Some(Self::RichText),
            "date" => Some(Self::Date),
            "number" | "integer" => Some(Self::Number),
            "url" => Some(Self::Url),
            _ => None,
        }
    }
}

/// Share of a form row a field occupies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutWidth {
    #[default]
    Full,
    Half,
    Third,
    Quarter,
}

impl LayoutWidth {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "full" => Some(Self::Full),
            "1/2" | "half" => Some(Self::Half),
            "1/3" | "third" => Some(Self::Third),
            "1/4" | "quarter" => Some(Self::Quarter),
            _ => None,
        }
    }

    /// Number of grid columns out of twelve.
    pub fn columns(self) -> u8 {
        match self {
            Self::Full => 12,
            Self::Half => 6,
            Self::Third => 4,
            Self::Quarter => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub key: String,
    pub label: String,
    pub value_type: ValueType,
    pub layout_width: LayoutWidth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSchema {
    pub key: String,
    pub title: String,
    pub description: String,
    pub cardinality: EntryCardinality,
    pub fields: Vec<FieldSchema>,
}

impl SectionSchema {
    pub fn field(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.key == key)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// The field used to label an entry of this section.
    pub fn primary_field(&self) -> Option<&FieldSchema> {
        self.fields.first()
    }

    pub fn allows_many(&self) -> bool {
        self.cardinality == EntryCardinality::Many
    }

    /// Every field key mapped to an empty string, in schema order.
    pub fn blank_values(&self) -> IndexMap<String, String> {
        self.fields
            .iter()
            .map(|field| (field.key.clone(), String::new()))
            .collect()
    }

    /// Label used when an entry has no primary value yet.
    pub fn fallback_entry_title(&self) -> String {
        format!("{} entry", self.title)
    }
}

/// The active set of sections, in authoritative schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeSchema {
    sections: IndexMap<String, SectionSchema>,
}

impl ResumeSchema {
    /// Builds a schema, failing fast on empty or colliding keys.
    pub fn new(sections: Vec<SectionSchema>) -> Result<Self, SchemaError> {
        let mut by_key = IndexMap::with_capacity(sections.len());
        for section in sections {
            if section.key.is_empty() {
                return Err(SchemaError::EmptyKey {
                    label: section.title.clone(),
                });
            }
            let mut seen = std::collections::HashSet::new();
            for field in &section.fields {
                if field.key.is_empty() {
                    return Err(SchemaError::EmptyKey {
                        label: field.label.clone(),
                    });
                }
                if !seen.insert(field.key.as_str()) {
                    return Err(SchemaError::DuplicateFieldKey {
                        section: section.key.clone(),
                        key: field.key.clone(),
                    });
                }
            }
            if by_key.contains_key(&section.key) {
                return Err(SchemaError::DuplicateSectionKey {
                    key: section.key.clone(),
                });
            }
            by_key.insert(section.key.clone(), section);
        }
        Ok(Self { sections: by_key })
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionSchema> {
        self.sections.values()
    }

    pub fn section(&self, key: &str) -> Option<&SectionSchema> {
        self.sections.get(key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.sections.get_index_of(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.sections.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
