mod index;
mod issue;
mod panel;
mod sanitize;
mod title;

pub use index::{AnalysisIndex, EntryIssues, SectionAnalysisIndex, worst_severity};
pub use issue::{AnalysisIssue, AnalysisReport, IssueCategory, SectionAnalysis, Severity};
pub use panel::{EntryAnalysisRow, EntryPlacement, SectionStatus, entry_rows, section_status};
pub use sanitize::sanitize_report;
pub use title::{entry_title, truncate_title};
