use serde::{Deserialize, Serialize};

/// Behaviour switches for [`crate::ResumeEditor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Newly added entries start expanded.
    pub auto_expand_new_entries: bool,
    /// Sections open when they gain their first entry, or when an add is attempted.
    pub auto_open_sections: bool,
    pub normalize_urls_on_save: bool,
    /// Display columns available for entry titles.
    pub title_max_width: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            auto_expand_new_entries: true,
            auto_open_sections: true,
            normalize_urls_on_save: true,
            title_max_width: 48,
        }
    }
}

impl EditorOptions {
    pub fn with_auto_expand(mut self, enabled: bool) -> Self {
        self.auto_expand_new_entries = enabled;
        self
    }

    pub fn with_auto_open_sections(mut self, enabled: bool) -> Self {
        self.auto_open_sections = enabled;
        self
    }

    pub fn with_url_normalization(mut self, enabled: bool) -> Self {
        self.normalize_urls_on_save = enabled;
        self
    }

    pub fn with_title_max_width(mut self, width: usize) -> Self {
        self.title_max_width = width;
        self
    }
}
