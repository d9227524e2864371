use crate::domain::LayoutWidth::{self, Full, Half, Quarter};

/// Presentation hints for one field, keyed by field slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHints {
    pub width: LayoutWidth,
    pub rich_text: bool,
    pub url: bool,
}

impl FieldHints {
    const fn width(width: LayoutWidth) -> Self {
        Self {
            width,
            rich_text: false,
            url: false,
        }
    }

    const fn rich() -> Self {
        Self {
            width: Full,
            rich_text: true,
            url: false,
        }
    }

    const fn url(width: LayoutWidth) -> Self {
        Self {
            width,
            rich_text: false,
            url: true,
        }
    }
}

impl Default for FieldHints {
    fn default() -> Self {
        Self::width(Full)
    }
}

/// Presentation hints for one section, keyed by section slug.
#[derive(Debug)]
pub struct SectionHints {
    pub key: &'static str,
    pub description: &'static str,
    pub fields: &'static [(&'static str, FieldHints)],
}

impl SectionHints {
    pub fn field(&self, key: &str) -> FieldHints {
        self.fields
            .iter()
            .find(|(field_key, _)| *field_key == key)
            .map(|(_, hints)| *hints)
            .unwrap_or_default()
    }
}

static SECTION_HINTS: &[SectionHints] = &[
    SectionHints {
        key: "personal-information",
        description: "Add your personal information here",
        fields: &[
            ("first-name", FieldHints::width(Half)),
            ("last-name", FieldHints::width(Half)),
            ("designation", FieldHints::width(Full)),
            ("email", FieldHints::width(Quarter)),
            ("phone", FieldHints::width(Quarter)),
            ("address", FieldHints::width(Half)),
            ("city", FieldHints::width(Quarter)),
            ("state", FieldHints::width(Quarter)),
            ("zip-code", FieldHints::width(Quarter)),
            ("country", FieldHints::width(Quarter)),
            ("linkedin", FieldHints::url(Half)),
            ("github", FieldHints::url(Half)),
        ],
    },
    SectionHints {
        key: "education",
        description: "Add your education here",
        fields: &[
            ("school", FieldHints::width(Full)),
            ("degree", FieldHints::width(Half)),
            ("field-of-study", FieldHints::width(Half)),
            ("start-date", FieldHints::width(Quarter)),
            ("end-date", FieldHints::width(Quarter)),
            ("grade", FieldHints::width(Quarter)),
            ("gpa", FieldHints::width(Quarter)),
            ("description", FieldHints::rich()),
        ],
    },
    SectionHints {
        key: "work-experience",
        description: "Add your work experience here",
        fields: &[
            ("company", FieldHints::width(Half)),
            ("position", FieldHints::width(Half)),
            ("start-date", FieldHints::width(Half)),
            ("end-date", FieldHints::width(Half)),
            ("description", FieldHints::rich()),
        ],
    },
    SectionHints {
        key: "portfolio",
        description: "Add your portfolio here",
        fields: &[
            ("title", FieldHints::width(Half)),
            ("url", FieldHints::url(Half)),
            ("description", FieldHints::rich()),
        ],
    },
    SectionHints {
        key: "skills",
        description: "Add your skills here",
        fields: &[("skill", FieldHints::width(Full)), ("description", FieldHints::rich())],
    },
    SectionHints {
        key: "projects",
        description: "Add your projects here",
        fields: &[
            ("project-name", FieldHints::width(Full)),
            ("description", FieldHints::rich()),
        ],
    },
    SectionHints {
        key: "references",
        description: "Add your references here",
        fields: &[
            ("reference-name", FieldHints::width(Full)),
            ("description", FieldHints::rich()),
        ],
    },
    SectionHints {
        key: "certifications",
        description: "Add your certifications here",
        fields: &[
            ("certification-name", FieldHints::width(Full)),
            ("description", FieldHints::rich()),
        ],
    },
    SectionHints {
        key: "languages",
        description: "Add your languages here",
        fields: &[
            ("language", FieldHints::width(Half)),
            ("proficiency", FieldHints::width(Half)),
        ],
    },
];

pub fn section_hints(key: &str) -> Option<&'static SectionHints> {
    SECTION_HINTS.iter().find(|hints| hints.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_default_to_full_width_plain() {
        let hints = section_hints("education").expect("education hints");
        assert_eq!(hints.field("gpa").width, LayoutWidth::Quarter);
        assert!(hints.field("description").rich_text);
        assert_eq!(hints.field("nope"), FieldHints::default());
    }

    #[test]
    fn url_fields_are_flagged() {
        let hints = section_hints("personal-information").expect("personal hints");
        assert!(hints.field("github").url);
        assert!(!hints.field("email").url);
        assert!(section_hints("hobbies").is_none());
    }
}
