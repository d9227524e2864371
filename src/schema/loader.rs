use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    EntryCardinality, FieldSchema, LayoutWidth, ResumeSchema, SectionSchema, ValueType,
};

use super::{
    error::SchemaError,
    layout::{FieldHints, section_hints},
    slug::derive_key,
};

/// Wire shape of `GET schema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub sections: Vec<SchemaSectionDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSectionDocument {
    #[serde(default)]
    pub section_key: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub entry_type: String,
    pub fields: Vec<SchemaFieldDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFieldDocument {
    #[serde(default)]
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

/// Parse a schema document from JSON text.
pub fn load_schema_str(contents: &str) -> Result<ResumeSchema> {
    let document: SchemaDocument =
        serde_json::from_str(contents).context("failed to parse schema document")?;
    schema_from_document(&document).context("schema document is not usable")
}

/// Parse a schema document from an already decoded JSON value.
pub fn load_schema_value(value: &Value) -> Result<ResumeSchema> {
    let document = SchemaDocument::deserialize(value).context("schema has an unexpected shape")?;
    schema_from_document(&document).context("schema document is not usable")
}

/// Normalise a schema document, applying local layout hints by key.
///
/// Missing keys are derived from titles and labels; provided keys must already be slugs.
pub fn schema_from_document(document: &SchemaDocument) -> Result<ResumeSchema, SchemaError> {
    let mut sections = Vec::with_capacity(document.sections.len());
    for raw in &document.sections {
        let key = resolve_key(&raw.section_key, &raw.title)?;
        let cardinality =
            EntryCardinality::parse(&raw.entry_type).ok_or_else(|| SchemaError::UnknownEntryType {
                section: key.clone(),
                value: raw.entry_type.clone(),
            })?;
        let hints = section_hints(&key);

        let mut fields = Vec::with_capacity(raw.fields.len());
        for raw_field in &raw.fields {
            let field_key = resolve_key(&raw_field.key, &raw_field.label)?;
            let field_hints = hints
                .map(|hints| hints.field(&field_key))
                .unwrap_or_default();
            fields.push(FieldSchema {
                value_type: resolve_value_type(&key, &field_key, raw_field, field_hints)?,
                layout_width: raw_field
                    .width
                    .as_deref()
                    .and_then(LayoutWidth::parse)
                    .unwrap_or(field_hints.width),
                label: raw_field.label.clone(),
                key: field_key,
            });
        }

        sections.push(SectionSchema {
            title: raw.title.clone(),
            description: raw
                .description
                .clone()
                .or_else(|| hints.map(|hints| hints.description.to_string()))
                .unwrap_or_default(),
            cardinality,
            fields,
            key,
        });
    }
    ResumeSchema::new(sections)
}

fn resolve_key(provided: &str, title: &str) -> Result<String, SchemaError> {
    if provided.is_empty() {
        let derived = derive_key(title);
        if derived.is_empty() {
            return Err(SchemaError::EmptyKey {
                label: title.to_string(),
            });
        }
        return Ok(derived);
    }
    let expected = derive_key(provided);
    if expected != provided {
        return Err(SchemaError::InvalidKey {
            key: provided.to_string(),
            expected,
        });
    }
    Ok(provided.to_string())
}

fn resolve_value_type(
    section: &str,
    field: &str,
    raw: &SchemaFieldDocument,
    hints: FieldHints,
) -> Result<ValueType, SchemaError> {
    let parsed = ValueType::parse(&raw.field_type).ok_or_else(|| SchemaError::UnknownFieldType {
        section: section.to_string(),
        field: field.to_string(),
        value: raw.field_type.clone(),
    })?;
    if parsed != ValueType::PlainText {
        return Ok(parsed);
    }
    let rich = hints.rich_text || raw.editor.as_deref() == Some("quill");
    Ok(if rich {
        ValueType::RichText
    } else if hints.url {
        ValueType::Url
    } else {
        ValueType::PlainText
    })
}
