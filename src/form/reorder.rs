use tracing::{debug, trace};

use crate::domain::{EntryCardinality, ResumeDocument};

use super::error::FormError;

/// Location of an entry as the drag layer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryPosition {
    pub section_index: usize,
    pub entry_index: usize,
}

impl EntryPosition {
    pub fn new(section_index: usize, entry_index: usize) -> Self {
        Self {
            section_index,
            entry_index,
        }
    }
}

/// A move the drag layer asks for, within one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub section_index: usize,
    pub from: usize,
    pub to: usize,
}

impl ResumeDocument {
    /// Take the entry at `from` out and reinsert it at `to`.
    ///
    /// Returns `false` for `from == to`. Indices are never clamped.
    pub fn move_entry(&mut self, section_key: &str, from: usize, to: usize) -> Result<bool, FormError> {
        let section = self.live_section_mut(section_key)?;
        let len = section.len();
        for index in [from, to] {
            if index >= len {
                return Err(FormError::IndexOutOfRange {
                    section: section_key.to_string(),
                    index,
                    len,
                });
            }
        }
        if from == to {
            return Ok(false);
        }
        let entries = section.entries_mut();
        let entry = entries.remove(from);
        entries.insert(to, entry);
        debug!(section = section_key, from, to, "entry moved");
        Ok(true)
    }

    /// Apply a drag-layer request addressed by section position.
    pub fn apply_move(&mut self, request: MoveRequest) -> Result<bool, FormError> {
        let Some(section_key) = self
            .sections()
            .get(request.section_index)
            .map(|section| section.key().to_string())
        else {
            return Err(FormError::UnknownSectionIndex {
                index: request.section_index,
            });
        };
        self.move_entry(&section_key, request.from, request.to)
    }
}

/// Tracks one drag gesture and turns hover events into moves.
///
/// The dragged entry's index follows every emitted move, and a hover repeating
/// the previous one is ignored so a stationary pointer never re-triggers.
#[derive(Debug, Clone)]
pub struct DragSession {
    section_index: usize,
    current_index: usize,
    enabled: bool,
    last_hover: Option<EntryPosition>,
}

impl DragSession {
    /// Starts a drag. Entries of single-entry sections are never draggable.
    pub fn begin(origin: EntryPosition, cardinality: EntryCardinality) -> Self {
        Self {
            section_index: origin.section_index,
            current_index: origin.entry_index,
            enabled: cardinality == EntryCardinality::Many,
            last_hover: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Where the dragged entry currently sits.
    pub fn position(&self) -> EntryPosition {
        EntryPosition::new(self.section_index, self.current_index)
    }

    pub fn hover(&mut self, target: EntryPosition) -> Option<MoveRequest> {
        if !self.enabled {
            return None;
        }
        if target.section_index != self.section_index {
            trace!(
                origin = self.section_index,
                target = target.section_index,
                "ignoring cross-section hover"
            );
            return None;
        }
        if self.last_hover == Some(target) {
            return None;
        }
        self.last_hover = Some(target);
        if target.entry_index == self.current_index {
            return None;
        }
        let request = MoveRequest {
            section_index: self.section_index,
            from: self.current_index,
            to: target.entry_index,
        };
        self.current_index = target.entry_index;
        Some(request)
    }

    /// Feed a hover event and forward any resulting move to `on_move(from, to)`.
    pub fn hover_with(&mut self, target: EntryPosition, mut on_move: impl FnMut(usize, usize)) -> bool {
        match self.hover(target) {
            Some(request) => {
                on_move(request.from, request.to);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{domain::EntryId, schema::builtin_schema};

    use super::*;

    fn doc_with(count: usize) -> (ResumeDocument, Vec<EntryId>) {
        let schema = builtin_schema().unwrap();
        let mut doc = ResumeDocument::empty(&schema);
        let ids = (0..count)
            .map(|_| doc.add_entry(&schema, "skills").unwrap().entry_id().cloned().unwrap())
            .collect();
        (doc, ids)
    }

    fn order(doc: &ResumeDocument) -> Vec<EntryId> {
        doc.section("skills").unwrap().ids().cloned().collect()
    }

    #[test]
    fn move_first_to_last() {
        let (mut doc, ids) = doc_with(3);
        assert!(doc.move_entry("skills", 0, 2).unwrap());
        assert_eq!(order(&doc), vec![ids[1].clone(), ids[2].clone(), ids[0].clone()]);
    }

    #[test]
    fn move_and_back_restores_order() {
        let (mut doc, ids) = doc_with(4);
        doc.move_entry("skills", 3, 1).unwrap();
        doc.move_entry("skills", 1, 3).unwrap();
        assert_eq!(order(&doc), ids);
    }

    #[test]
    fn same_index_is_a_noop_and_out_of_range_fails() {
        let (mut doc, ids) = doc_with(2);
        assert!(!doc.move_entry("skills", 1, 1).unwrap());
        let err = doc.move_entry("skills", 0, 2).unwrap_err();
        assert!(matches!(err, FormError::IndexOutOfRange { index: 2, len: 2, .. }));
        assert_eq!(order(&doc), ids);
    }

    #[test]
    fn drag_session_deduplicates_hovers() {
        let mut drag = DragSession::begin(EntryPosition::new(4, 0), EntryCardinality::Many);
        assert_eq!(
            drag.hover(EntryPosition::new(4, 1)),
            Some(MoveRequest {
                section_index: 4,
                from: 0,
                to: 1
            })
        );
        assert_eq!(drag.hover(EntryPosition::new(4, 1)), None);
        assert_eq!(drag.position(), EntryPosition::new(4, 1));
        assert_eq!(
            drag.hover(EntryPosition::new(4, 2)).map(|m| (m.from, m.to)),
            Some((1, 2))
        );
    }

    #[test]
    fn drag_session_ignores_other_sections_and_single_sections() {
        let mut drag = DragSession::begin(EntryPosition::new(1, 0), EntryCardinality::Many);
        assert_eq!(drag.hover(EntryPosition::new(2, 0)), None);

        let mut single = DragSession::begin(EntryPosition::new(0, 0), EntryCardinality::One);
        assert!(!single.is_enabled());
        let mut calls = 0;
        assert!(!single.hover_with(EntryPosition::new(0, 1), |_, _| calls += 1));
        assert_eq!(calls, 0);
    }

    #[test]
    fn drag_moves_apply_to_document() {
        let (mut doc, ids) = doc_with(3);
        let section_index = doc.section_index("skills").unwrap();
        let mut drag =
            DragSession::begin(EntryPosition::new(section_index, 2), EntryCardinality::Many);
        for target in [1, 1, 0] {
            if let Some(request) = drag.hover(EntryPosition::new(section_index, target)) {
                doc.apply_move(request).unwrap();
            }
        }
        assert_eq!(order(&doc), vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]);
    }
}
