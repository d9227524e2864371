use std::collections::HashSet;

use anyhow::{Context, Result};
use indexmap::IndexSet;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    domain::{Entry, EntryCardinality, EntryId, ResumeDocument, ResumeSchema, Section, SectionSchema},
    form::{FormError, section_schema},
};

use super::wire::{RawDocument, RawItem, RawSection};

/// Parse a stored resume from JSON text without validating it.
pub fn parse_raw_document_str(contents: &str) -> Result<RawDocument> {
    serde_json::from_str(contents).context("failed to parse resume document")
}

/// Parse and normalise a stored resume in one step.
pub fn load_document_str(contents: &str, schema: &ResumeSchema) -> Result<ResumeDocument> {
    let raw = parse_raw_document_str(contents)?;
    ResumeDocument::from_raw(raw, schema).context("resume document does not match the schema")
}

impl ResumeDocument {
    /// Normalise a stored payload into a live document.
    ///
    /// Raw section order is kept; schema sections the payload lacks are
    /// appended empty, in schema order. Provided ids survive verbatim unless
    /// blank or repeated. Unknown section or field keys are rejected.
    pub fn from_raw(raw: RawDocument, schema: &ResumeSchema) -> Result<Self, FormError> {
        let mut seen_sections = IndexSet::with_capacity(schema.len());
        let mut seen_ids = HashSet::new();
        let mut sections = Vec::with_capacity(schema.len());

        for raw_section in raw.sections {
            let section_schema = section_schema(schema, &raw_section.section_key)?;
            if !seen_sections.insert(raw_section.section_key.clone()) {
                return Err(FormError::DuplicateSection {
                    section: raw_section.section_key,
                });
            }
            let mut items = raw_section.items;
            if section_schema.cardinality == EntryCardinality::One && items.len() > 1 {
                warn!(
                    section = %section_schema.key,
                    dropped = items.len() - 1,
                    "single-entry section delivered several items; keeping the first"
                );
                items.truncate(1);
            }
            let entries = items
                .into_iter()
                .map(|item| entry_from_raw(section_schema, item, &mut seen_ids))
                .collect::<Result<Vec<_>, _>>()?;
            sections.push(Section::with_entries(raw_section.section_key, entries));
        }

        for section_schema in schema.sections() {
            if !seen_sections.contains(section_schema.key.as_str()) {
                sections.push(Section::empty(section_schema.key.clone()));
            }
        }
        Ok(Self::from_sections(raw.resume_id, sections))
    }

    /// Serialise into the stored shape, ids and field order included.
    pub fn to_raw(&self) -> RawDocument {
        RawDocument {
            resume_id: self.resume_id().map(str::to_string),
            sections: self
                .sections()
                .iter()
                .map(|section| RawSection {
                    section_key: section.key().to_string(),
                    items: section.entries().iter().map(entry_to_raw).collect(),
                })
                .collect(),
        }
    }
}

fn entry_from_raw(
    schema: &SectionSchema,
    item: RawItem,
    seen_ids: &mut HashSet<String>,
) -> Result<Entry, FormError> {
    let mut values = schema.blank_values();
    for (field_key, value) in item.values {
        if !schema.has_field(&field_key) {
            return Err(FormError::unknown_field(&schema.key, &field_key));
        }
        let value = coerce_value(&schema.key, &field_key, value)?;
        values.insert(field_key, value);
    }
    let id = match item.id.filter(|id| !id.trim().is_empty()) {
        Some(id) if seen_ids.insert(id.clone()) => EntryId::from(id),
        Some(id) => {
            let fresh = EntryId::generate();
            warn!(section = %schema.key, duplicate = %id, reassigned = %fresh, "duplicate entry id");
            seen_ids.insert(fresh.to_string());
            fresh
        }
        None => {
            let fresh = EntryId::generate();
            debug!(section = %schema.key, assigned = %fresh, "entry without id");
            seen_ids.insert(fresh.to_string());
            fresh
        }
    };
    Ok(Entry::from_parts(id, values))
}

fn entry_to_raw(entry: &Entry) -> RawItem {
    RawItem {
        id: Some(entry.id().to_string()),
        values: entry
            .values()
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect::<Map<_, _>>(),
    }
}

fn coerce_value(section: &str, field: &str, value: Value) -> Result<String, FormError> {
    let kind = match value {
        Value::String(text) => return Ok(text),
        Value::Null => return Ok(String::new()),
        Value::Bool(flag) => return Ok(flag.to_string()),
        Value::Number(number) => return Ok(number.to_string()),
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    Err(FormError::UnsupportedValue {
        section: section.to_string(),
        field: field.to_string(),
        message: format!("expected a string, found {kind}"),
    })
}
