use thiserror::Error;
use tracing::debug;

use crate::{
    analysis::{AnalysisReport, sanitize_report},
    domain::{ResumeDocument, ResumeSchema},
    form::FormError,
    schema::{SchemaError, schema_from_document},
};

use super::{
    backend::{BackendError, ResumeBackend},
    wire::SaveRequest,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("response does not match the schema: {0}")]
    Form(#[from] FormError),

    #[error("schema response is unusable: {0}")]
    Schema(#[from] SchemaError),
}

impl PersistenceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Backend(err) if err.is_not_found())
    }
}

/// Identifies one in-flight request so late answers can be matched against
/// what the editor is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    resume_id: String,
    generation: u64,
}

impl RequestTicket {
    pub(crate) fn new(resume_id: impl Into<String>, generation: u64) -> Self {
        Self {
            resume_id: resume_id.into(),
            generation,
        }
    }

    pub fn resume_id(&self) -> &str {
        &self.resume_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A backend answer together with the ticket of the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged<T> {
    pub ticket: RequestTicket,
    pub result: Result<T, PersistenceError>,
}

/// Document state captured when a save is issued.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSnapshot {
    pub resume_id: String,
    pub revision: u64,
    pub document: ResumeDocument,
}

/// Maps backend payloads to normalised core values and back.
#[derive(Debug, Clone)]
pub struct PersistenceAdapter<B> {
    backend: B,
}

impl<B: ResumeBackend> PersistenceAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn fetch_schema(&self) -> Result<ResumeSchema, PersistenceError> {
        let document = self.backend.fetch_schema().await?;
        Ok(schema_from_document(&document)?)
    }

    pub async fn load(&self, ticket: RequestTicket, schema: &ResumeSchema) -> Tagged<ResumeDocument> {
        let result = self.load_document(ticket.resume_id(), schema).await;
        Tagged { ticket, result }
    }

    async fn load_document(
        &self,
        resume_id: &str,
        schema: &ResumeSchema,
    ) -> Result<ResumeDocument, PersistenceError> {
        let raw = self.backend.load_resume(resume_id).await?;
        let document = ResumeDocument::from_raw(raw, schema)?;
        debug!(resume = resume_id, entries = document.entry_count(), "resume loaded");
        Ok(with_default_id(document, resume_id))
    }

    /// Send the snapshot and normalise the echoed state.
    pub async fn save(
        &self,
        snapshot: &SaveSnapshot,
        schema: &ResumeSchema,
    ) -> Result<ResumeDocument, PersistenceError> {
        let request = SaveRequest::from(snapshot.document.to_raw());
        let echo = self
            .backend
            .save_resume(&snapshot.resume_id, &request)
            .await?;
        let document = ResumeDocument::from_raw(echo, schema)?;
        debug!(resume = %snapshot.resume_id, revision = snapshot.revision, "resume saved");
        Ok(with_default_id(document, &snapshot.resume_id))
    }

    /// Latest analysis, sanitised against the schema. A missing analysis is
    /// `Ok(None)`, whichever way the backend reports it.
    pub async fn latest_analysis(
        &self,
        ticket: RequestTicket,
        schema: &ResumeSchema,
    ) -> Tagged<Option<AnalysisReport>> {
        let result = match self.backend.latest_analysis(ticket.resume_id()).await {
            Ok(Some(report)) => prepare_report(report, schema).map(Some),
            Ok(None) => Ok(None),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err.into()),
        };
        Tagged { ticket, result }
    }

    pub async fn generate_analysis(
        &self,
        ticket: RequestTicket,
        schema: &ResumeSchema,
    ) -> Tagged<Option<AnalysisReport>> {
        let result = match self.backend.generate_analysis(ticket.resume_id()).await {
            Ok(report) => prepare_report(report, schema).map(Some),
            Err(err) => Err(err.into()),
        };
        Tagged { ticket, result }
    }
}

fn prepare_report(
    mut report: AnalysisReport,
    schema: &ResumeSchema,
) -> Result<AnalysisReport, PersistenceError> {
    let adjusted = sanitize_report(&mut report, schema)?;
    debug!(analysis = %report.analysis_id, adjusted, "analysis report received");
    Ok(report)
}

fn with_default_id(document: ResumeDocument, resume_id: &str) -> ResumeDocument {
    if document.resume_id().is_some() {
        document
    } else {
        document.with_resume_id(resume_id)
    }
}
