mod builtin;
mod error;
mod layout;
mod loader;
mod slug;

pub use builtin::{builtin_schema, builtin_schema_document};
pub use error::SchemaError;
pub use layout::{FieldHints, SectionHints, section_hints};
pub use loader::{
    SchemaDocument, SchemaFieldDocument, SchemaSectionDocument, load_schema_str,
    load_schema_value, schema_from_document,
};
pub use slug::{derive_key, slugify, to_key};
