use serde::{Deserialize, Serialize};

use crate::domain::EntryId;

/// Issue severity, ordered `Info < Warning < Error`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Typo,
    Grammar,
    Tone,
    Clarity,
    Format,
    Consistency,
    Impact,
    Ats,
    Other,
}

/// One critique item. Addresses a section, an entry of it, or a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisIssue {
    pub section_key: String,
    #[serde(default)]
    pub item_id: Option<EntryId>,
    #[serde(default)]
    pub field_key: Option<String>,
    pub severity: Severity,
    pub category: IssueCategory,
    pub message: String,
    #[serde(default)]
    pub suggestion: String,
    #[serde(default)]
    pub replacement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionAnalysis {
    pub section_key: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub issues: Vec<AnalysisIssue>,
}

/// Wire shape of `GET analysis/{id}/latest` and `POST analysis/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(alias = "analysis_id")]
    pub analysis_id: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default, alias = "overall_summary")]
    pub overall_summary: String,
    #[serde(default, alias = "recruiter_feedback")]
    pub recruiter_feedback: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub sections: Vec<SectionAnalysis>,
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl AnalysisReport {
    /// Every issue of the report in arrival order.
    pub fn issues(&self) -> impl Iterator<Item = &AnalysisIssue> {
        self.sections.iter().flat_map(|section| section.issues.iter())
    }
}
