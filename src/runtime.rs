use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    analysis::{
        AnalysisIndex, AnalysisReport, EntryAnalysisRow, SectionStatus, entry_rows, entry_title,
        section_status, truncate_title,
    },
    domain::{EntryId, FieldAddress, ResumeDocument, ResumeSchema},
    form::{
        AddOutcome, CommandOutcome, DragSession, EditCommand, EntryPosition, ExpansionState,
        FormError, MoveRequest, section_schema,
    },
    io::{PersistenceError, RequestTicket, SaveSnapshot, Tagged, normalize_url_fields},
    options::EditorOptions,
};

/// Editing session for one resume: the document, its expansion state, the
/// latest analysis, and bookkeeping for requests in flight.
///
/// Every accepted document mutation bumps the revision. Backend answers are
/// applied whole or not at all.
#[derive(Debug, Clone)]
pub struct ResumeEditor {
    schema: Arc<ResumeSchema>,
    document: ResumeDocument,
    expansion: ExpansionState,
    options: EditorOptions,
    revision: u64,
    saved_revision: u64,
    generation: u64,
    pending_load: Option<RequestTicket>,
    pending_analysis: Option<RequestTicket>,
    analysis: Option<AnalysisIndex>,
    report: Option<AnalysisReport>,
}

impl ResumeEditor {
    pub fn new(schema: impl Into<Arc<ResumeSchema>>) -> Self {
        let schema = schema.into();
        let document = ResumeDocument::empty(&schema);
        Self {
            expansion: ExpansionState::for_document(&document),
            schema,
            document,
            options: EditorOptions::default(),
            revision: 0,
            saved_revision: 0,
            generation: 0,
            pending_load: None,
            pending_analysis: None,
            analysis: None,
            report: None,
        }
    }

    pub fn with_options(mut self, options: EditorOptions) -> Self {
        self.options = options;
        self.expansion = self.fresh_expansion();
        self
    }

    pub fn with_document(mut self, document: ResumeDocument) -> Self {
        self.set_document(document);
        self
    }

    pub fn schema(&self) -> &ResumeSchema {
        &self.schema
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether there are edits the backend has not acknowledged.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    pub fn analysis(&self) -> Option<&AnalysisIndex> {
        self.analysis.as_ref()
    }

    pub fn analysis_report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    /// Replace the document outright, e.g. with an import result. Supersedes
    /// any load in flight and counts as already saved.
    pub fn set_document(&mut self, document: ResumeDocument) {
        if self.document.resume_id() != document.resume_id() {
            self.clear_analysis();
        }
        self.pending_load = None;
        self.document = document;
        self.expansion = self.fresh_expansion();
        self.revision += 1;
        self.saved_revision = self.revision;
    }

    pub fn can_add_entry(&self, section_key: &str) -> Result<bool, FormError> {
        self.document.can_add_entry(&self.schema, section_key)
    }

    /// Append a blank entry. The section opens even when the add is blocked.
    pub fn add_entry(&mut self, section_key: &str) -> Result<AddOutcome, FormError> {
        let outcome = self.document.add_entry(&self.schema, section_key)?;
        if self.options.auto_open_sections {
            self.expansion.set_section_open(section_key, true);
        }
        if let AddOutcome::Added(id) = &outcome {
            if self.options.auto_expand_new_entries {
                self.expansion.expand(id.clone());
            }
            self.touch();
        }
        Ok(outcome)
    }

    pub fn remove_entry(&mut self, section_key: &str, entry_id: &str) -> Result<bool, FormError> {
        let removed = self.document.remove_entry(section_key, entry_id)?;
        if removed {
            self.expansion.forget_entry(entry_id);
            self.touch();
        }
        Ok(removed)
    }

    pub fn set_field_value(
        &mut self,
        address: &FieldAddress,
        value: impl Into<String>,
    ) -> Result<bool, FormError> {
        let changed = self.document.set_field_value(&self.schema, address, value)?;
        if changed {
            self.touch();
        }
        Ok(changed)
    }

    pub fn move_entry(&mut self, section_key: &str, from: usize, to: usize) -> Result<bool, FormError> {
        let moved = self.document.move_entry(section_key, from, to)?;
        if moved {
            self.touch();
        }
        Ok(moved)
    }

    pub fn apply_move(&mut self, request: MoveRequest) -> Result<bool, FormError> {
        let moved = self.document.apply_move(request)?;
        if moved {
            self.touch();
        }
        Ok(moved)
    }

    /// Start dragging the entry at `entry_index` of a section.
    pub fn begin_drag(&self, section_key: &str, entry_index: usize) -> Result<DragSession, FormError> {
        let section_schema = section_schema(&self.schema, section_key)?;
        let section_index = self
            .document
            .section_index(section_key)
            .ok_or_else(|| FormError::unknown_section(section_key))?;
        let len = self.document.sections()[section_index].len();
        if entry_index >= len {
            return Err(FormError::IndexOutOfRange {
                section: section_key.to_string(),
                index: entry_index,
                len,
            });
        }
        Ok(DragSession::begin(
            EntryPosition::new(section_index, entry_index),
            section_schema.cardinality,
        ))
    }

    /// Feed one hover event of a drag and apply the move it produces, if any.
    pub fn drag_hover(
        &mut self,
        session: &mut DragSession,
        target: EntryPosition,
    ) -> Result<bool, FormError> {
        match session.hover(target) {
            Some(request) => self.apply_move(request),
            None => Ok(false),
        }
    }

    /// Flip an entry open or closed. Unknown ids are ignored.
    pub fn toggle_entry(&mut self, entry_id: &EntryId) -> bool {
        if self.document.find_entry(entry_id.as_str()).is_none() {
            warn!(entry = %entry_id, "toggle entry: id not found");
            return false;
        }
        self.expansion.toggle_entry(entry_id)
    }

    pub fn toggle_section(&mut self, section_key: &str) -> Result<bool, FormError> {
        section_schema(&self.schema, section_key)?;
        Ok(self.expansion.toggle_section(section_key))
    }

    pub fn dispatch(&mut self, command: EditCommand) -> Result<CommandOutcome, FormError> {
        let outcome = match command {
            EditCommand::AddEntry { section_key } => match self.add_entry(&section_key)? {
                AddOutcome::Added(id) => CommandOutcome::EntryAdded(id),
                AddOutcome::Blocked => CommandOutcome::AddBlocked,
            },
            EditCommand::RemoveEntry {
                section_key,
                entry_id,
            } => CommandOutcome::from_changed(self.remove_entry(&section_key, entry_id.as_str())?),
            EditCommand::MoveEntry {
                section_key,
                from,
                to,
            } => CommandOutcome::from_changed(self.move_entry(&section_key, from, to)?),
            EditCommand::DragMove(request) => CommandOutcome::from_changed(self.apply_move(request)?),
            EditCommand::SetField { address, value } => {
                CommandOutcome::from_changed(self.set_field_value(&address, value)?)
            }
            EditCommand::ToggleEntry(id) => CommandOutcome::Expanded(self.toggle_entry(&id)),
            EditCommand::ToggleSection(key) => CommandOutcome::SectionOpen(self.toggle_section(&key)?),
        };
        Ok(outcome)
    }

    /// Display title of an entry, truncated to the configured width. Ids not
    /// in the document get the section's generic label.
    pub fn entry_title(&self, section_key: &str, entry_id: &str) -> Result<String, FormError> {
        let section_schema = section_schema(&self.schema, section_key)?;
        let title = self
            .document
            .section(section_key)
            .and_then(|section| section.entry(entry_id))
            .map(|entry| entry_title(section_schema, entry.values()))
            .unwrap_or_else(|| section_schema.fallback_entry_title());
        Ok(truncate_title(&title, self.options.title_max_width).into_owned())
    }

    /// Analysis rows for a section panel; empty when nothing was analysed.
    pub fn analysis_rows(&self, section_key: &str) -> Result<Vec<EntryAnalysisRow<'_>>, FormError> {
        let section_schema = section_schema(&self.schema, section_key)?;
        let section = self
            .document
            .section(section_key)
            .ok_or_else(|| FormError::unknown_section(section_key))?;
        let Some(index) = self
            .analysis
            .as_ref()
            .and_then(|analysis| analysis.section(section_key))
        else {
            return Ok(Vec::new());
        };
        let mut rows = entry_rows(section_schema, section, index);
        for row in &mut rows {
            let title = truncate_title(&row.title, self.options.title_max_width).into_owned();
            row.title = title;
        }
        Ok(rows)
    }

    pub fn section_status(&self, section_key: &str) -> Result<SectionStatus, FormError> {
        let section = self
            .document
            .section(section_key)
            .ok_or_else(|| FormError::unknown_section(section_key))?;
        let analysis = self
            .analysis
            .as_ref()
            .and_then(|analysis| analysis.section(section_key));
        Ok(section_status(section, analysis))
    }

    /// Ticket for loading `resume_id`. Any earlier load still in flight is
    /// superseded.
    pub fn begin_load(&mut self, resume_id: impl Into<String>) -> RequestTicket {
        let ticket = self.next_ticket(resume_id.into());
        self.pending_load = Some(ticket.clone());
        ticket
    }

    pub fn cancel_load(&mut self) {
        self.pending_load = None;
    }

    /// Apply a load answer. Answers for superseded tickets are dropped and
    /// reported as `Ok(false)`; failures leave the document untouched.
    pub fn apply_loaded(&mut self, tagged: Tagged<ResumeDocument>) -> Result<bool, PersistenceError> {
        let Tagged { ticket, result } = tagged;
        if self.pending_load.as_ref() != Some(&ticket) {
            warn!(
                resume = ticket.resume_id(),
                generation = ticket.generation(),
                "discarding superseded load"
            );
            return Ok(false);
        }
        self.pending_load = None;
        let document = result?;
        if document.resume_id() != Some(ticket.resume_id()) {
            warn!(
                requested = ticket.resume_id(),
                received = document.resume_id(),
                "discarding load for another resume"
            );
            return Ok(false);
        }
        debug!(resume = ticket.resume_id(), "load applied");
        self.set_document(document);
        Ok(true)
    }

    /// Capture what a save should send. `None` until the document has a
    /// resume id.
    pub fn snapshot_for_save(&self) -> Option<SaveSnapshot> {
        let resume_id = self.document.resume_id()?.to_string();
        let mut document = self.document.clone();
        if self.options.normalize_urls_on_save {
            normalize_url_fields(&mut document, &self.schema);
        }
        Some(SaveSnapshot {
            resume_id,
            revision: self.revision,
            document,
        })
    }

    /// Apply a save answer.
    ///
    /// The echo replaces the document only when nothing was edited since the
    /// snapshot; otherwise local edits win and stay dirty. Failures leave the
    /// document untouched.
    pub fn apply_saved(
        &mut self,
        snapshot: &SaveSnapshot,
        result: Result<ResumeDocument, PersistenceError>,
    ) -> Result<bool, PersistenceError> {
        let echo = result?;
        if self.document.resume_id() != Some(snapshot.resume_id.as_str()) {
            warn!(resume = %snapshot.resume_id, "discarding save echo for another resume");
            return Ok(false);
        }
        self.saved_revision = self.saved_revision.max(snapshot.revision);
        if self.revision != snapshot.revision {
            debug!(
                snapshot = snapshot.revision,
                current = self.revision,
                "edits made during save are kept"
            );
            return Ok(false);
        }
        self.document = echo;
        self.revision += 1;
        self.saved_revision = self.revision;
        self.sync_expansion();
        Ok(true)
    }

    /// Ticket for fetching or generating analysis of the current resume.
    pub fn begin_analysis(&mut self) -> Option<RequestTicket> {
        let resume_id = self.document.resume_id()?.to_string();
        let ticket = self.next_ticket(resume_id);
        self.pending_analysis = Some(ticket.clone());
        Some(ticket)
    }

    /// Apply an analysis answer. `Ok(None)` clears the overlay.
    pub fn apply_analysis(
        &mut self,
        tagged: Tagged<Option<AnalysisReport>>,
    ) -> Result<bool, PersistenceError> {
        let Tagged { ticket, result } = tagged;
        if self.pending_analysis.as_ref() != Some(&ticket)
            || self.document.resume_id() != Some(ticket.resume_id())
        {
            warn!(
                resume = ticket.resume_id(),
                generation = ticket.generation(),
                "discarding stale analysis"
            );
            return Ok(false);
        }
        self.pending_analysis = None;
        match result? {
            Some(report) => {
                self.analysis = Some(AnalysisIndex::from_report(&report));
                self.report = Some(report);
            }
            None => self.clear_analysis(),
        }
        Ok(true)
    }

    fn next_ticket(&mut self, resume_id: String) -> RequestTicket {
        self.generation += 1;
        RequestTicket::new(resume_id, self.generation)
    }

    fn clear_analysis(&mut self) {
        self.analysis = None;
        self.report = None;
        self.pending_analysis = None;
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.sync_expansion();
    }

    fn sync_expansion(&mut self) {
        if self.options.auto_open_sections {
            self.expansion.observe(&self.document);
        } else {
            self.expansion.prune(&self.document);
        }
    }

    fn fresh_expansion(&self) -> ExpansionState {
        if self.options.auto_open_sections {
            ExpansionState::for_document(&self.document)
        } else {
            ExpansionState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builtin_schema;

    fn editor() -> ResumeEditor {
        ResumeEditor::new(builtin_schema().unwrap())
    }

    #[test]
    fn added_entries_start_expanded_in_an_open_section() {
        let mut editor = editor();
        let id = editor.add_entry("skills").unwrap().entry_id().cloned().unwrap();
        assert!(editor.expansion().is_expanded(id.as_str()));
        assert!(editor.expansion().is_section_open("skills"));
        assert!(editor.is_dirty());
    }

    #[test]
    fn blocked_add_still_opens_the_section() {
        let mut editor = editor();
        editor.add_entry("personal-information").unwrap();
        assert!(!editor.toggle_section("personal-information").unwrap());
        let revision = editor.revision();
        assert_eq!(editor.add_entry("personal-information").unwrap(), AddOutcome::Blocked);
        assert!(editor.expansion().is_section_open("personal-information"));
        assert_eq!(editor.revision(), revision);
    }

    #[test]
    fn removing_an_entry_forgets_its_expansion() {
        let mut editor = editor();
        let id = editor.add_entry("skills").unwrap().entry_id().cloned().unwrap();
        assert!(editor.remove_entry("skills", id.as_str()).unwrap());
        assert!(!editor.expansion().is_expanded(id.as_str()));
        assert!(!editor.remove_entry("skills", id.as_str()).unwrap());
    }

    #[test]
    fn dispatch_routes_commands() {
        let mut editor = editor();
        let CommandOutcome::EntryAdded(id) = editor
            .dispatch(EditCommand::AddEntry {
                section_key: "languages".into(),
            })
            .unwrap()
        else {
            panic!("expected an added entry");
        };
        let outcome = editor
            .dispatch(EditCommand::SetField {
                address: FieldAddress::new("languages", &id, "language"),
                value: "Norwegian".into(),
            })
            .unwrap();
        assert!(outcome.mutated_document());
        assert_eq!(
            editor.dispatch(EditCommand::ToggleEntry(id.clone())).unwrap(),
            CommandOutcome::Expanded(false)
        );
        assert_eq!(editor.entry_title("languages", id.as_str()).unwrap(), "Norwegian");
        assert_eq!(
            editor.dispatch(EditCommand::ToggleSection("hobbies".into())),
            Err(FormError::UnknownSection {
                section: "hobbies".into()
            })
        );
    }

    #[test]
    fn drag_in_single_section_is_inert() {
        let mut editor = editor();
        editor.add_entry("personal-information").unwrap();
        let mut session = editor.begin_drag("personal-information", 0).unwrap();
        assert!(!session.is_enabled());
        let target = EntryPosition::new(session.position().section_index, 0);
        assert!(!editor.drag_hover(&mut session, target).unwrap());
        assert!(editor.begin_drag("personal-information", 1).is_err());
    }

    #[test]
    fn titles_are_truncated_to_the_configured_width() {
        let mut editor = ResumeEditor::new(builtin_schema().unwrap())
            .with_options(EditorOptions::default().with_title_max_width(6));
        let id = editor.add_entry("projects").unwrap().entry_id().cloned().unwrap();
        editor
            .set_field_value(&FieldAddress::new("projects", &id, "project-name"), "Compiler")
            .unwrap();
        assert_eq!(editor.entry_title("projects", id.as_str()).unwrap(), "Compi…");
        assert_eq!(editor.entry_title("projects", "gone").unwrap(), "Proje…");
    }
}
