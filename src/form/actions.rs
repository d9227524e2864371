use crate::domain::{EntryId, FieldAddress};

use super::reorder::MoveRequest;

/// A UI mutation, applied through `ResumeEditor::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    AddEntry { section_key: String },
    RemoveEntry { section_key: String, entry_id: EntryId },
    MoveEntry { section_key: String, from: usize, to: usize },
    DragMove(MoveRequest),
    SetField { address: FieldAddress, value: String },
    ToggleEntry(EntryId),
    ToggleSection(String),
}

/// What a dispatched command changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    EntryAdded(EntryId),
    /// Add was refused because the section is single-entry and occupied.
    AddBlocked,
    Changed,
    Unchanged,
    Expanded(bool),
    SectionOpen(bool),
}

impl CommandOutcome {
    pub(crate) fn from_changed(changed: bool) -> Self {
        if changed { Self::Changed } else { Self::Unchanged }
    }

    pub fn mutated_document(&self) -> bool {
        matches!(self, Self::EntryAdded(_) | Self::Changed)
    }
}
