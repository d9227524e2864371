use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use resumeform::{
    ResumeEditor,
    analysis::{AnalysisReport, Severity},
    domain::{FieldAddress, ResumeSchema},
    io::{
        BackendError, BackendResult, PersistenceAdapter, RawDocument, ResumeBackend, SaveRequest,
    },
    schema::{SchemaDocument, builtin_schema, builtin_schema_document},
};
use serde_json::json;

#[derive(Default)]
struct MemoryBackend {
    resumes: Mutex<HashMap<String, RawDocument>>,
    analyses: Mutex<HashMap<String, AnalysisReport>>,
    fail_saves: AtomicBool,
}

impl MemoryBackend {
    fn with_resume(self, raw: serde_json::Value) -> Self {
        let raw: RawDocument = serde_json::from_value(raw).expect("raw resume");
        let id = raw.resume_id.clone().expect("resume id");
        self.resumes.lock().unwrap().insert(id, raw);
        self
    }

    fn with_analysis(self, resume_id: &str, report: serde_json::Value) -> Self {
        let report = serde_json::from_value(report).expect("report");
        self.analyses
            .lock()
            .unwrap()
            .insert(resume_id.to_string(), report);
        self
    }
}

#[async_trait]
impl ResumeBackend for MemoryBackend {
    async fn fetch_schema(&self) -> BackendResult<SchemaDocument> {
        Ok(builtin_schema_document())
    }

    async fn load_resume(&self, resume_id: &str) -> BackendResult<RawDocument> {
        self.resumes
            .lock()
            .unwrap()
            .get(resume_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("resume {resume_id}")))
    }

    async fn save_resume(&self, resume_id: &str, request: &SaveRequest) -> BackendResult<RawDocument> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(BackendError::Network("connection reset".into()));
        }
        let stored = RawDocument {
            resume_id: Some(resume_id.to_string()),
            sections: request.sections.clone(),
        };
        self.resumes
            .lock()
            .unwrap()
            .insert(resume_id.to_string(), stored.clone());
        Ok(stored)
    }

    async fn latest_analysis(&self, resume_id: &str) -> BackendResult<Option<AnalysisReport>> {
        match self.analyses.lock().unwrap().get(resume_id) {
            Some(report) => Ok(Some(report.clone())),
            None => Err(BackendError::http(404, "no analysis", "latest analysis")),
        }
    }

    async fn generate_analysis(&self, resume_id: &str) -> BackendResult<AnalysisReport> {
        self.analyses
            .lock()
            .unwrap()
            .get(resume_id)
            .cloned()
            .ok_or_else(|| BackendError::http(500, "generator offline", "generate analysis"))
    }
}

fn resume(id: &str, school: &str) -> serde_json::Value {
    json!({
        "resumeId": id,
        "sections": [
            {
                "sectionKey": "education",
                "items": [{ "id": format!("{id}-edu"), "values": { "school": school } }]
            },
            {
                "sectionKey": "personal-information",
                "items": [{ "id": format!("{id}-me"), "values": { "first-name": "Ada", "github": "@ada" } }]
            }
        ]
    })
}

fn analysis(id: &str, entry_id: &str) -> serde_json::Value {
    json!({
        "analysisId": id,
        "sections": [{
            "sectionKey": "education",
            "summary": "Needs dates",
            "issues": [{
                "sectionKey": "education",
                "itemId": entry_id,
                "fieldKey": "start-date",
                "severity": "warning",
                "category": "format",
                "message": "Missing start date"
            }]
        }]
    })
}

fn setup(backend: MemoryBackend) -> (PersistenceAdapter<Arc<MemoryBackend>>, Arc<ResumeSchema>, ResumeEditor) {
    let schema = Arc::new(builtin_schema().unwrap());
    let editor = ResumeEditor::new(schema.clone());
    (PersistenceAdapter::new(Arc::new(backend)), schema, editor)
}

async fn load(
    adapter: &PersistenceAdapter<Arc<MemoryBackend>>,
    schema: &ResumeSchema,
    editor: &mut ResumeEditor,
    resume_id: &str,
) {
    let ticket = editor.begin_load(resume_id);
    let tagged = adapter.load(ticket, schema).await;
    assert_eq!(editor.apply_loaded(tagged), Ok(true));
}

#[tokio::test]
async fn fetched_schema_matches_builtin() {
    let (adapter, schema, _) = setup(MemoryBackend::default());
    assert_eq!(adapter.fetch_schema().await.unwrap(), *schema);
}

#[tokio::test]
async fn superseded_load_is_discarded() {
    let backend = MemoryBackend::default()
        .with_resume(resume("r1", "MIT"))
        .with_resume(resume("r2", "ETH"));
    let (adapter, schema, mut editor) = setup(backend);

    let first = editor.begin_load("r1");
    let second = editor.begin_load("r2");
    let late = adapter.load(first, &schema).await;
    let current = adapter.load(second, &schema).await;

    assert_eq!(editor.apply_loaded(current), Ok(true));
    assert_eq!(editor.apply_loaded(late), Ok(false));
    assert_eq!(editor.document().resume_id(), Some("r2"));
    assert!(editor.document().find_entry("r2-edu").is_some());
    assert!(!editor.is_loading());
    assert!(editor.expansion().is_section_open("education"));
}

#[tokio::test]
async fn failed_load_keeps_the_current_document() {
    let (adapter, schema, mut editor) = setup(MemoryBackend::default().with_resume(resume("r1", "MIT")));
    load(&adapter, &schema, &mut editor, "r1").await;
    let before = editor.document().clone();

    let ticket = editor.begin_load("missing");
    let tagged = adapter.load(ticket, &schema).await;
    let err = editor.apply_loaded(tagged).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(editor.document(), &before);
}

#[tokio::test]
async fn save_echo_replaces_document_with_normalised_urls() {
    let (adapter, schema, mut editor) = setup(MemoryBackend::default().with_resume(resume("r1", "MIT")));
    load(&adapter, &schema, &mut editor, "r1").await;
    let github = FieldAddress::new("personal-information", "r1-me", "github");
    editor.set_field_value(&github, "@octocat").unwrap();
    assert!(editor.is_dirty());

    let snapshot = editor.snapshot_for_save().expect("snapshot");
    let result = adapter.save(&snapshot, &schema).await;
    assert_eq!(editor.apply_saved(&snapshot, result), Ok(true));

    assert!(!editor.is_dirty());
    assert_eq!(editor.document().field_value(&github), Some("https://github.com/octocat"));
}

#[tokio::test]
async fn failed_save_leaves_edits_in_place() {
    let backend = MemoryBackend::default().with_resume(resume("r1", "MIT"));
    backend.fail_saves.store(true, Ordering::SeqCst);
    let (adapter, schema, mut editor) = setup(backend);
    load(&adapter, &schema, &mut editor, "r1").await;
    let school = FieldAddress::new("education", "r1-edu", "school");
    editor.set_field_value(&school, "Stanford").unwrap();
    let before = editor.document().clone();

    let snapshot = editor.snapshot_for_save().expect("snapshot");
    let result = adapter.save(&snapshot, &schema).await;
    assert!(editor.apply_saved(&snapshot, result).is_err());

    assert_eq!(editor.document(), &before);
    assert!(editor.is_dirty());
}

#[tokio::test]
async fn edits_made_during_a_save_win_over_the_echo() {
    let (adapter, schema, mut editor) = setup(MemoryBackend::default().with_resume(resume("r1", "MIT")));
    load(&adapter, &schema, &mut editor, "r1").await;
    let school = FieldAddress::new("education", "r1-edu", "school");

    editor.set_field_value(&school, "Stanford").unwrap();
    let snapshot = editor.snapshot_for_save().expect("snapshot");
    let in_flight = adapter.save(&snapshot, &schema);
    editor.set_field_value(&school, "Oxford").unwrap();
    let result = in_flight.await;

    assert_eq!(editor.apply_saved(&snapshot, result), Ok(false));
    assert_eq!(editor.document().field_value(&school), Some("Oxford"));
    assert!(editor.is_dirty());
}

#[tokio::test]
async fn missing_analysis_is_not_an_error() {
    let (adapter, schema, mut editor) = setup(MemoryBackend::default().with_resume(resume("r1", "MIT")));
    load(&adapter, &schema, &mut editor, "r1").await;

    let ticket = editor.begin_analysis().expect("ticket");
    let tagged = adapter.latest_analysis(ticket, &schema).await;
    assert_eq!(tagged.result, Ok(None));
    assert_eq!(editor.apply_analysis(tagged), Ok(true));
    assert!(editor.analysis().is_none());

    let ticket = editor.begin_analysis().expect("ticket");
    let tagged = adapter.generate_analysis(ticket, &schema).await;
    assert!(editor.apply_analysis(tagged).is_err());
}

#[tokio::test]
async fn analysis_for_another_resume_is_discarded() {
    let backend = MemoryBackend::default()
        .with_resume(resume("r1", "MIT"))
        .with_resume(resume("r2", "ETH"))
        .with_analysis("r1", analysis("a1", "r1-edu"));
    let (adapter, schema, mut editor) = setup(backend);
    load(&adapter, &schema, &mut editor, "r1").await;

    let ticket = editor.begin_analysis().expect("ticket");
    let pending = adapter.latest_analysis(ticket, &schema);
    load(&adapter, &schema, &mut editor, "r2").await;
    let tagged = pending.await;

    assert_eq!(editor.apply_analysis(tagged), Ok(false));
    assert!(editor.analysis().is_none());
}

#[tokio::test]
async fn removed_entries_keep_their_analysis() {
    let backend = MemoryBackend::default()
        .with_resume(resume("r1", "MIT"))
        .with_analysis("r1", analysis("a1", "r1-edu"));
    let (adapter, schema, mut editor) = setup(backend);
    load(&adapter, &schema, &mut editor, "r1").await;

    let ticket = editor.begin_analysis().expect("ticket");
    let tagged = adapter.latest_analysis(ticket, &schema).await;
    assert_eq!(editor.apply_analysis(tagged), Ok(true));
    assert_eq!(editor.entry_title("education", "r1-edu").unwrap(), "MIT");

    assert!(editor.remove_entry("education", "r1-edu").unwrap());

    let index = editor.analysis().expect("analysis");
    let orphan = index.entry("education", "r1-edu").expect("orphan bucket");
    assert_eq!(orphan.field_severity("start-date"), Some(Severity::Warning));
    let rows = editor.analysis_rows("education").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Education entry");
    assert_eq!(
        editor.section_status("education").unwrap(),
        resumeform::analysis::SectionStatus::NeedsAttention(Severity::Warning)
    );
}
