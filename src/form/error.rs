use thiserror::Error;

/// Errors raised by record-store operations. All of them mean the caller
/// referenced something the schema or the document does not know about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown section '{section}'")]
    UnknownSection { section: String },

    #[error("section '{section}' has no field '{field}'")]
    UnknownField { section: String, field: String },

    #[error("index {index} is out of range for section '{section}' with {len} entries")]
    IndexOutOfRange {
        section: String,
        index: usize,
        len: usize,
    },

    #[error("no section at position {index}")]
    UnknownSectionIndex { index: usize },

    #[error("section '{section}' appears more than once")]
    DuplicateSection { section: String },

    #[error("{section}.{field}: {message}")]
    UnsupportedValue {
        section: String,
        field: String,
        message: String,
    },
}

impl FormError {
    pub(crate) fn unknown_section(section: &str) -> Self {
        Self::UnknownSection {
            section: section.to_string(),
        }
    }

    pub(crate) fn unknown_field(section: &str, field: &str) -> Self {
        Self::UnknownField {
            section: section.to_string(),
            field: field.to_string(),
        }
    }
}
