use serde::Serialize;

use super::OrderedMap;

/// Value of one field inside a key/value section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Items(Vec<String>),
}

/// Typed value of one section, shaped by its schema-declared kind.
///
/// Exits are stored as a `List` of canonical entry strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SectionValue {
    Prose(String),
    List(Vec<String>),
    Fields(OrderedMap<FieldValue>),
}

impl SectionValue {
    pub fn as_prose(&self) -> Option<&str> {
        match self {
            SectionValue::Prose(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SectionValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&OrderedMap<FieldValue>> {
        match self {
            SectionValue::Fields(fields) => Some(fields),
            _ => None,
        }
    }
}

pub type Sections = OrderedMap<SectionValue>;

/// The terminal output record for one room document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRoom {
    title: String,
    sections: Sections,
    section_order: Vec<String>,
}

impl NormalizedRoom {
    pub fn new(title: String, sections: Sections, section_order: Vec<String>) -> Self {
        Self {
            title,
            sections,
            section_order,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&SectionValue> {
        self.sections.get(name)
    }

    pub fn section_order(&self) -> &[String] {
        &self.section_order
    }

    /// Pretty JSON with two-space indent and a trailing newline.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn to_json_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
