use std::{borrow::Borrow, fmt};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::schema::{ResumeSchema, SectionSchema};

/// Stable identity of an entry. Assigned once, never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&EntryId> for EntryId {
    fn from(value: &EntryId) -> Self {
        value.clone()
    }
}

impl Borrow<str> for EntryId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One record of a section. Every schema field is present; unset ones are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: EntryId,
    values: IndexMap<String, String>,
}

impl Entry {
    pub(crate) fn blank(schema: &SectionSchema) -> Self {
        Self {
            id: EntryId::generate(),
            values: schema.blank_values(),
        }
    }

    pub(crate) fn from_parts(id: EntryId, values: IndexMap<String, String>) -> Self {
        Self { id, values }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn value(&self, field_key: &str) -> Option<&str> {
        self.values.get(field_key).map(String::as_str)
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut IndexMap<String, String> {
        &mut self.values
    }

    pub fn is_blank(&self) -> bool {
        self.values.values().all(|value| value.trim().is_empty())
    }
}

/// Live entries of one section, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    key: String,
    entries: Vec<Entry>,
}

impl Section {
    pub fn empty(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn with_entries(key: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            key: key.into(),
            entries,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<Entry> {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id.as_str() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id.as_str() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntryId> {
        self.entries.iter().map(Entry::id)
    }
}

/// The editable resume: sections in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    resume_id: Option<String>,
    sections: Vec<Section>,
}

impl ResumeDocument {
    /// One empty section per schema section, in schema order.
    pub fn empty(schema: &ResumeSchema) -> Self {
        Self {
            resume_id: None,
            sections: schema
                .sections()
                .map(|section| Section::empty(section.key.clone()))
                .collect(),
        }
    }

    pub(crate) fn from_sections(resume_id: Option<String>, sections: Vec<Section>) -> Self {
        Self {
            resume_id,
            sections,
        }
    }

    pub fn resume_id(&self) -> Option<&str> {
        self.resume_id.as_deref()
    }

    pub fn with_resume_id(mut self, resume_id: impl Into<String>) -> Self {
        self.resume_id = Some(resume_id.into());
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, key: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.key == key)
    }

    pub fn section_index(&self, key: &str) -> Option<usize> {
        self.sections.iter().position(|section| section.key == key)
    }

    pub(crate) fn sections_mut(&mut self) -> &mut [Section] {
        &mut self.sections
    }

    pub(crate) fn section_mut(&mut self, key: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|section| section.key == key)
    }

    /// Looks an entry up anywhere in the document; ids are unique document-wide.
    pub fn find_entry(&self, id: &str) -> Option<(&Section, &Entry)> {
        self.sections
            .iter()
            .find_map(|section| section.entry(id).map(|entry| (section, entry)))
    }

    pub fn entry_ids(&self) -> impl Iterator<Item = &EntryId> {
        self.sections.iter().flat_map(Section::ids)
    }

    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }
}

/// Structured address of a single field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldAddress {
    pub section_key: String,
    pub entry_id: EntryId,
    pub field_key: String,
}

impl FieldAddress {
    pub fn new(
        section_key: impl Into<String>,
        entry_id: impl Into<EntryId>,
        field_key: impl Into<String>,
    ) -> Self {
        Self {
            section_key: section_key.into(),
            entry_id: entry_id.into(),
            field_key: field_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_uuid_v4() {
        let id = EntryId::generate();
        let parsed = Uuid::parse_str(id.as_str()).expect("uuid");
        assert_eq!(parsed.get_version_num(), 4);
        assert_ne!(id, EntryId::generate());
    }

    #[test]
    fn find_entry_searches_all_sections() {
        let entry = Entry::from_parts(EntryId::from("e1"), IndexMap::new());
        let doc = ResumeDocument::from_sections(
            None,
            vec![
                Section::empty("personal-information"),
                Section::with_entries("education", vec![entry]),
            ],
        );
        let (section, found) = doc.find_entry("e1").expect("entry");
        assert_eq!(section.key(), "education");
        assert_eq!(found.id().as_str(), "e1");
        assert!(doc.find_entry("missing").is_none());
        assert_eq!(doc.entry_count(), 1);
    }
}
