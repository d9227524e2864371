use async_trait::async_trait;
use thiserror::Error;

use crate::{analysis::AnalysisReport, schema::SchemaDocument};

use super::wire::{RawDocument, SaveRequest};

/// Failure reported by the network layer that owns the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("{context} ({status}): {body}")]
    Http {
        status: u16,
        context: String,
        body: String,
    },

    #[error("unexpected response: {0}")]
    Parse(String),
}

impl BackendError {
    pub fn http(status: u16, body: impl Into<String>, context: &str) -> Self {
        Self::Http {
            status,
            context: context.to_string(),
            body: body.into(),
        }
    }

    pub fn parse(err: impl std::fmt::Display) -> Self {
        Self::Parse(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Http { status: 404, .. })
    }

    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Typed requests the editing core needs from the network layer.
#[async_trait]
pub trait ResumeBackend: Send + Sync {
    /// `GET schema`
    async fn fetch_schema(&self) -> BackendResult<SchemaDocument>;

    /// `GET resume/{id}`
    async fn load_resume(&self, resume_id: &str) -> BackendResult<RawDocument>;

    /// `PUT resume/{id}`; answers with the stored state.
    async fn save_resume(&self, resume_id: &str, request: &SaveRequest) -> BackendResult<RawDocument>;

    /// `GET analysis/{id}/latest`; `Ok(None)` when nothing was generated yet.
    async fn latest_analysis(&self, resume_id: &str) -> BackendResult<Option<AnalysisReport>>;

    /// `POST analysis/{id}`
    async fn generate_analysis(&self, resume_id: &str) -> BackendResult<AnalysisReport>;
}

#[async_trait]
impl<B: ResumeBackend + ?Sized> ResumeBackend for std::sync::Arc<B> {
    async fn fetch_schema(&self) -> BackendResult<SchemaDocument> {
        (**self).fetch_schema().await
    }

    async fn load_resume(&self, resume_id: &str) -> BackendResult<RawDocument> {
        (**self).load_resume(resume_id).await
    }

    async fn save_resume(&self, resume_id: &str, request: &SaveRequest) -> BackendResult<RawDocument> {
        (**self).save_resume(resume_id, request).await
    }

    async fn latest_analysis(&self, resume_id: &str) -> BackendResult<Option<AnalysisReport>> {
        (**self).latest_analysis(resume_id).await
    }

    async fn generate_analysis(&self, resume_id: &str) -> BackendResult<AnalysisReport> {
        (**self).generate_analysis(resume_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_failures() {
        assert!(BackendError::NotFound("analysis".into()).is_not_found());
        assert!(BackendError::http(404, "missing", "latest analysis").is_not_found());
        assert!(BackendError::http(503, "busy", "save resume").is_transient());
        assert!(!BackendError::Unauthorized.is_transient());
        assert_eq!(
            BackendError::http(422, "bad field", "save resume").to_string(),
            "save resume (422): bad field"
        );
    }
}
