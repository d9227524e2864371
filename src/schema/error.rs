use thiserror::Error;

/// Configuration errors found while building a schema. Not user-recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("'{label}' produces an empty key")]
    EmptyKey { label: String },

    #[error("'{key}' is not a stable slug (expected '{expected}')")]
    InvalidKey { key: String, expected: String },

    #[error("section key '{key}' is defined more than once")]
    DuplicateSectionKey { key: String },

    #[error("field key '{key}' is defined more than once in section '{section}'")]
    DuplicateFieldKey { section: String, key: String },

    #[error("section '{section}' has unknown entry type '{value}'")]
    UnknownEntryType { section: String, value: String },

    #[error("field '{field}' in section '{section}' has unknown type '{value}'")]
    UnknownFieldType {
        section: String,
        field: String,
        value: String,
    },
}
