use tracing::{debug, warn};

use crate::domain::{
    Entry, EntryId, FieldAddress, ResumeDocument, ResumeSchema, Section, SectionSchema,
};

use super::error::FormError;

/// Result of an add-entry request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(EntryId),
    /// The section is single-entry and already holds one.
    Blocked,
}

impl AddOutcome {
    pub fn entry_id(&self) -> Option<&EntryId> {
        match self {
            Self::Added(id) => Some(id),
            Self::Blocked => None,
        }
    }
}

pub(crate) fn section_schema<'a>(
    schema: &'a ResumeSchema,
    section_key: &str,
) -> Result<&'a SectionSchema, FormError> {
    schema
        .section(section_key)
        .ok_or_else(|| FormError::unknown_section(section_key))
}

impl ResumeDocument {
    pub(crate) fn live_section_mut(&mut self, section_key: &str) -> Result<&mut Section, FormError> {
        self.section_mut(section_key)
            .ok_or_else(|| FormError::unknown_section(section_key))
    }

    /// Whether another entry may be appended to the section.
    pub fn can_add_entry(&self, schema: &ResumeSchema, section_key: &str) -> Result<bool, FormError> {
        let section_schema = section_schema(schema, section_key)?;
        let section = self
            .section(section_key)
            .ok_or_else(|| FormError::unknown_section(section_key))?;
        Ok(section_schema.cardinality.allows(section.len() + 1))
    }

    /// Append a blank entry with a fresh id.
    pub fn add_entry(
        &mut self,
        schema: &ResumeSchema,
        section_key: &str,
    ) -> Result<AddOutcome, FormError> {
        let section_schema = section_schema(schema, section_key)?;
        let section = self.live_section_mut(section_key)?;
        if !section_schema.cardinality.allows(section.len() + 1) {
            warn!(section = section_key, "add entry blocked: section holds a single entry");
            return Ok(AddOutcome::Blocked);
        }
        let entry = Entry::blank(section_schema);
        let id = entry.id().clone();
        section.entries_mut().push(entry);
        debug!(section = section_key, entry = %id, "entry added");
        Ok(AddOutcome::Added(id))
    }

    /// Remove an entry by id. Returns `false` when the id is not in the section.
    pub fn remove_entry(&mut self, section_key: &str, entry_id: &str) -> Result<bool, FormError> {
        let section = self.live_section_mut(section_key)?;
        let Some(index) = section.position(entry_id) else {
            warn!(section = section_key, entry = entry_id, "remove entry: id not found");
            return Ok(false);
        };
        section.entries_mut().remove(index);
        debug!(section = section_key, entry = entry_id, "entry removed");
        Ok(true)
    }

    /// Point update of one field value.
    ///
    /// Unknown section or field keys are schema mismatches and fail; a missing
    /// entry id is a no-op reported as `false`.
    pub fn set_field_value(
        &mut self,
        schema: &ResumeSchema,
        address: &FieldAddress,
        value: impl Into<String>,
    ) -> Result<bool, FormError> {
        let section_schema = section_schema(schema, &address.section_key)?;
        if !section_schema.has_field(&address.field_key) {
            return Err(FormError::unknown_field(
                &address.section_key,
                &address.field_key,
            ));
        }
        let section = self.live_section_mut(&address.section_key)?;
        let Some(entry) = section
            .entries_mut()
            .iter_mut()
            .find(|entry| entry.id() == &address.entry_id)
        else {
            warn!(
                section = %address.section_key,
                entry = %address.entry_id,
                "set field: id not found"
            );
            return Ok(false);
        };
        entry
            .values_mut()
            .insert(address.field_key.clone(), value.into());
        Ok(true)
    }

    pub fn field_value(&self, address: &FieldAddress) -> Option<&str> {
        self.section(&address.section_key)?
            .entry(address.entry_id.as_str())?
            .value(&address.field_key)
    }
}
