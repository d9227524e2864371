use crate::domain::{EntryId, Section, SectionSchema};

use super::{
    index::{EntryIssues, SectionAnalysisIndex},
    issue::Severity,
    title::entry_title,
};

/// Whether an analysed entry still exists in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPlacement {
    InForm { index: usize },
    Orphaned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryAnalysisRow<'a> {
    pub entry_id: &'a EntryId,
    pub title: String,
    pub placement: EntryPlacement,
    pub worst_severity: Option<Severity>,
    pub issue_count: usize,
    pub issues: &'a EntryIssues,
}

/// Rows for the entries of a section that have analysis: those still in the
/// form first, in form order, then orphaned ids in index order.
pub fn entry_rows<'a>(
    schema: &SectionSchema,
    section: &Section,
    analysis: &'a SectionAnalysisIndex,
) -> Vec<EntryAnalysisRow<'a>> {
    let mut rows = Vec::with_capacity(analysis.by_entry().len());
    for (index, entry) in section.entries().iter().enumerate() {
        if let Some((entry_id, issues)) = analysis.by_entry().get_key_value(entry.id().as_str()) {
            rows.push(EntryAnalysisRow {
                entry_id,
                title: entry_title(schema, entry.values()),
                placement: EntryPlacement::InForm { index },
                worst_severity: issues.worst_severity(),
                issue_count: issues.issue_count(),
                issues,
            });
        }
    }
    for (entry_id, issues) in analysis.by_entry() {
        if section.entry(entry_id.as_str()).is_some() {
            continue;
        }
        rows.push(EntryAnalysisRow {
            entry_id,
            title: schema.fallback_entry_title(),
            placement: EntryPlacement::Orphaned,
            worst_severity: issues.worst_severity(),
            issue_count: issues.issue_count(),
            issues,
        });
    }
    rows
}

/// Headline state of a section's analysis panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStatus {
    NotAnalyzed,
    /// Analysed, has entries, nothing flagged.
    LooksGood,
    /// Analysed but empty and unflagged.
    Empty,
    NeedsAttention(Severity),
}

pub fn section_status(section: &Section, analysis: Option<&SectionAnalysisIndex>) -> SectionStatus {
    let Some(analysis) = analysis else {
        return SectionStatus::NotAnalyzed;
    };
    match analysis.worst_severity() {
        Some(severity) => SectionStatus::NeedsAttention(severity),
        None if section.is_empty() => SectionStatus::Empty,
        None => SectionStatus::LooksGood,
    }
}
