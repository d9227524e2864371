mod document;
mod schema;

pub use document::{Entry, EntryId, FieldAddress, ResumeDocument, Section};
pub use schema::{
    EntryCardinality, FieldSchema, LayoutWidth, ResumeSchema, SectionSchema, ValueType,
};
