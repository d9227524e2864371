use indexmap::IndexMap;

use crate::domain::{EntryId, FieldAddress};

use super::issue::{AnalysisIssue, AnalysisReport, Severity};

/// Highest severity among `issues`, `None` when there are none.
pub fn worst_severity<'a>(issues: impl IntoIterator<Item = &'a AnalysisIssue>) -> Option<Severity> {
    issues.into_iter().map(|issue| issue.severity).max()
}

/// Issues attached to one entry id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryIssues {
    entry_level: Vec<AnalysisIssue>,
    by_field: IndexMap<String, Vec<AnalysisIssue>>,
}

impl EntryIssues {
    pub fn entry_level(&self) -> &[AnalysisIssue] {
        &self.entry_level
    }

    pub fn by_field(&self) -> &IndexMap<String, Vec<AnalysisIssue>> {
        &self.by_field
    }

    pub fn field(&self, field_key: &str) -> &[AnalysisIssue] {
        self.by_field
            .get(field_key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Entry-level issues first, then field issues grouped by field.
    pub fn iter(&self) -> impl Iterator<Item = &AnalysisIssue> {
        self.entry_level
            .iter()
            .chain(self.by_field.values().flatten())
    }

    pub fn issue_count(&self) -> usize {
        self.entry_level.len() + self.by_field.values().map(Vec::len).sum::<usize>()
    }

    pub fn worst_severity(&self) -> Option<Severity> {
        worst_severity(self.iter())
    }

    pub fn field_severity(&self, field_key: &str) -> Option<Severity> {
        worst_severity(self.field(field_key))
    }
}

/// Issues of one section, bucketed by granularity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionAnalysisIndex {
    section_key: String,
    summary: String,
    section_level: Vec<AnalysisIssue>,
    by_entry: IndexMap<EntryId, EntryIssues>,
}

impl SectionAnalysisIndex {
    fn new(section_key: &str) -> Self {
        Self {
            section_key: section_key.to_string(),
            ..Self::default()
        }
    }

    pub fn section_key(&self) -> &str {
        &self.section_key
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn section_level(&self) -> &[AnalysisIssue] {
        &self.section_level
    }

    pub fn by_entry(&self) -> &IndexMap<EntryId, EntryIssues> {
        &self.by_entry
    }

    pub fn entry(&self, id: &str) -> Option<&EntryIssues> {
        self.by_entry.get(id)
    }

    pub fn issue_count(&self) -> usize {
        self.section_level.len() + self.by_entry.values().map(EntryIssues::issue_count).sum::<usize>()
    }

    pub fn worst_severity(&self) -> Option<Severity> {
        worst_severity(
            self.section_level
                .iter()
                .chain(self.by_entry.values().flat_map(EntryIssues::iter)),
        )
    }

    fn push(&mut self, issue: &AnalysisIssue) {
        let Some(item_id) = issue.item_id.as_ref() else {
            self.section_level.push(issue.clone());
            return;
        };
        let bucket = self.by_entry.entry(item_id.clone()).or_default();
        match issue.field_key.as_ref() {
            Some(field_key) => bucket
                .by_field
                .entry(field_key.clone())
                .or_default()
                .push(issue.clone()),
            None => bucket.entry_level.push(issue.clone()),
        }
    }
}

/// Nested lookup of analysis issues: section, then entry, then field.
///
/// Built once from an issue list and never updated afterwards. Buckets for
/// entry ids that are gone from the live document stay reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisIndex {
    analysis_id: Option<String>,
    sections: IndexMap<String, SectionAnalysisIndex>,
}

impl AnalysisIndex {
    /// Group issues by section, entry and field, keeping arrival order.
    pub fn build<'a>(issues: impl IntoIterator<Item = &'a AnalysisIssue>) -> Self {
        let mut index = Self::default();
        for issue in issues {
            index.section_entry(&issue.section_key).push(issue);
        }
        index
    }

    /// Index a full report, carrying per-section summaries along.
    pub fn from_report(report: &AnalysisReport) -> Self {
        let mut index = Self {
            analysis_id: Some(report.analysis_id.clone()),
            ..Self::default()
        };
        for section in &report.sections {
            index.section_entry(&section.section_key).summary = section.summary.clone();
        }
        for issue in report.issues() {
            index.section_entry(&issue.section_key).push(issue);
        }
        index
    }

    fn section_entry(&mut self, key: &str) -> &mut SectionAnalysisIndex {
        self.sections
            .entry(key.to_string())
            .or_insert_with(|| SectionAnalysisIndex::new(key))
    }

    pub fn analysis_id(&self) -> Option<&str> {
        self.analysis_id.as_deref()
    }

    pub fn section(&self, key: &str) -> Option<&SectionAnalysisIndex> {
        self.sections.get(key)
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionAnalysisIndex> {
        self.sections.values()
    }

    pub fn entry(&self, section_key: &str, entry_id: &str) -> Option<&EntryIssues> {
        self.section(section_key)?.entry(entry_id)
    }

    pub fn field_issues(&self, address: &FieldAddress) -> &[AnalysisIssue] {
        self.entry(&address.section_key, address.entry_id.as_str())
            .map(|entry| entry.field(&address.field_key))
            .unwrap_or_default()
    }

    pub fn issue_count(&self) -> usize {
        self.sections.values().map(SectionAnalysisIndex::issue_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
