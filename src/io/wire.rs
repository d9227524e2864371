use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wire shape of `GET resume/{id}` and the `PUT resume/{id}` echo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<String>,
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSection {
    pub section_key: String,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// One stored entry. Values stay loosely typed until they are checked
/// against the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub values: Map<String, Value>,
}

/// Body of `PUT resume/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub sections: Vec<RawSection>,
}

impl From<RawDocument> for SaveRequest {
    fn from(document: RawDocument) -> Self {
        Self {
            sections: document.sections,
        }
    }
}
