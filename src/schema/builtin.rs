use crate::domain::ResumeSchema;

use super::{
    error::SchemaError,
    loader::{SchemaDocument, SchemaFieldDocument, SchemaSectionDocument, schema_from_document},
};

struct BuiltinSection {
    title: &'static str,
    entry_type: &'static str,
    fields: &'static [(&'static str, &'static str)],
}

static BUILTIN_SECTIONS: &[BuiltinSection] = &[
    BuiltinSection {
        title: "Personal Information",
        entry_type: "single",
        fields: &[
            ("First Name", "text"),
            ("Last Name", "text"),
            ("Designation", "text"),
            ("Email", "text"),
            ("Phone", "text"),
            ("Address", "text"),
            ("City", "text"),
            ("State", "text"),
            ("Zip Code", "text"),
            ("Country", "text"),
            ("LinkedIn", "text"),
            ("GitHub", "text"),
        ],
    },
    BuiltinSection {
        title: "Education",
        entry_type: "multiple",
        fields: &[
            ("School", "text"),
            ("Degree", "text"),
            ("Field of Study", "text"),
            ("Start Date", "date"),
            ("End Date", "date"),
            ("Grade", "number"),
            ("GPA", "number"),
            ("Description", "text"),
        ],
    },
    BuiltinSection {
        title: "Work Experience",
        entry_type: "multiple",
        fields: &[
            ("Company", "text"),
            ("Position", "text"),
            ("Start Date", "date"),
            ("End Date", "date"),
            ("Description", "text"),
        ],
    },
    BuiltinSection {
        title: "Portfolio",
        entry_type: "multiple",
        fields: &[("Title", "text"), ("URL", "text"), ("Description", "text")],
    },
    BuiltinSection {
        title: "Skills",
        entry_type: "multiple",
        fields: &[("Skill", "text"), ("Description", "text")],
    },
    BuiltinSection {
        title: "Projects",
        entry_type: "multiple",
        fields: &[("Project Name", "text"), ("Description", "text")],
    },
    BuiltinSection {
        title: "References",
        entry_type: "multiple",
        fields: &[("Reference Name", "text"), ("Description", "text")],
    },
    BuiltinSection {
        title: "Certifications",
        entry_type: "multiple",
        fields: &[("Certification Name", "text"), ("Description", "text")],
    },
    BuiltinSection {
        title: "Languages",
        entry_type: "multiple",
        fields: &[("Language", "text"), ("Proficiency", "text")],
    },
];

/// The built-in resume layout as a schema document, keys left to be derived.
pub fn builtin_schema_document() -> SchemaDocument {
    SchemaDocument {
        sections: BUILTIN_SECTIONS
            .iter()
            .map(|section| SchemaSectionDocument {
                section_key: String::new(),
                title: section.title.to_string(),
                description: None,
                entry_type: section.entry_type.to_string(),
                fields: section
                    .fields
                    .iter()
                    .map(|(label, field_type)| SchemaFieldDocument {
                        key: String::new(),
                        label: label.to_string(),
                        field_type: field_type.to_string(),
                        width: None,
                        editor: None,
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// The built-in resume schema, normalised exactly like a fetched one.
pub fn builtin_schema() -> Result<ResumeSchema, SchemaError> {
    schema_from_document(&builtin_schema_document())
}
