use std::collections::HashMap;

use indexmap::IndexSet;

use crate::domain::{EntryId, ResumeDocument};

/// Open/closed bookkeeping for entries and sections.
///
/// Entry ids are unique across the document, so a single set covers every
/// section. Sections open on their own whenever their entry count goes from
/// zero to non-zero and are never closed automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: IndexSet<EntryId>,
    open_sections: IndexSet<String>,
    entry_counts: HashMap<String, usize>,
}

impl ExpansionState {
    /// Initial state for a freshly loaded document: non-empty sections open,
    /// every entry collapsed.
    pub fn for_document(document: &ResumeDocument) -> Self {
        let mut state = Self::default();
        state.observe(document);
        state
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn expanded_ids(&self) -> impl Iterator<Item = &EntryId> {
        self.expanded.iter()
    }

    pub fn expand(&mut self, id: EntryId) {
        self.expanded.insert(id);
    }

    pub fn collapse(&mut self, id: &str) -> bool {
        self.expanded.shift_remove(id)
    }

    /// Flip an entry and return whether it is now expanded.
    pub fn toggle_entry(&mut self, id: &EntryId) -> bool {
        if self.expanded.shift_remove(id.as_str()) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Drop every reference to a removed entry.
    pub fn forget_entry(&mut self, id: &str) {
        self.expanded.shift_remove(id);
    }

    pub fn is_section_open(&self, key: &str) -> bool {
        self.open_sections.contains(key)
    }

    pub fn open_sections(&self) -> impl Iterator<Item = &str> {
        self.open_sections.iter().map(String::as_str)
    }

    pub fn set_section_open(&mut self, key: &str, open: bool) {
        if open {
            self.open_sections.insert(key.to_string());
        } else {
            self.open_sections.shift_remove(key);
        }
    }

    /// Flip a section and return whether it is now open.
    pub fn toggle_section(&mut self, key: &str) -> bool {
        let open = !self.is_section_open(key);
        self.set_section_open(key, open);
        open
    }

    /// Reconcile with the current document: auto-open sections that just
    /// gained their first entry and drop expanded ids that no longer exist.
    pub fn observe(&mut self, document: &ResumeDocument) {
        for section in document.sections() {
            let previous = self
                .entry_counts
                .insert(section.key().to_string(), section.len())
                .unwrap_or(0);
            if previous == 0 && !section.is_empty() {
                self.open_sections.insert(section.key().to_string());
            }
        }
        self.prune(document);
    }

    /// Drop expanded ids that are no longer in the document.
    pub fn prune(&mut self, document: &ResumeDocument) {
        self.expanded
            .retain(|id| document.find_entry(id.as_str()).is_some());
    }
}
