#![deny(rust_2018_idioms)]

pub mod analysis;
pub mod domain;
pub mod form;
pub mod io;
mod options;
mod runtime;
pub mod schema;

pub use options::EditorOptions;
pub use runtime::ResumeEditor;

pub mod prelude {
    pub use super::{
        EditorOptions, ResumeEditor,
        analysis::{AnalysisIndex, AnalysisIssue, AnalysisReport, Severity},
        domain::{EntryId, FieldAddress, ResumeDocument, ResumeSchema},
        form::{AddOutcome, CommandOutcome, EditCommand, FormError},
        io::{PersistenceAdapter, PersistenceError, ResumeBackend},
        schema::builtin_schema,
    };
}
