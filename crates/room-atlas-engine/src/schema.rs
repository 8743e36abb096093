//! Grammar derivation from the external room schema.
//!
//! The schema is the only authority for section names, their order, their
//! value shapes and the title format. [`RoomSchema`] is built once per run and
//! shared by reference with every parsing step.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::vocab::EXITS_SECTION;

pub const DEFAULT_SCHEMA_PATH: &str = "schema/room_schema_v1.0.json";

const TITLE_PATTERN: &str = "properties.title.pattern";
const SECTION_ORDER: &str = "properties.section_order.const";
const REQUIRED_SECTIONS: &str = "properties.sections.required";
const SECTION_PROPERTIES: &str = "properties.sections.properties";

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Schema file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Could not read schema file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Schema JSON is invalid ({}): {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Schema root must be a JSON object")]
    RootNotObject,

    #[error("Schema missing {0}")]
    Missing(&'static str),

    #[error("Schema {location} must be {expected}")]
    WrongShape {
        location: &'static str,
        expected: &'static str,
    },

    #[error("Schema properties.title.pattern is not a valid regular expression: {source}")]
    InvalidTitlePattern { source: regex::Error },

    #[error("Schema section_order contains duplicates: {0:?}")]
    DuplicateSections(Vec<String>),

    #[error(
        "Schema drift: properties.sections.required must exactly match \
         properties.section_order.const\n\
         required:      {required:?}\n\
         section_order: {section_order:?}"
    )]
    Drift {
        required: Vec<String>,
        section_order: Vec<String>,
    },

    #[error("Schema missing section definition for {0:?} under properties.sections.properties")]
    MissingSectionDefinition(String),

    #[error("Unsupported section type for {section:?}: {found}")]
    UnsupportedSectionType { section: String, found: String },
}

/// How the content of one section is parsed.
///
/// Chosen per section from the schema's declared JSON type; the exits grammar
/// is the single name-keyed specialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// `"string"`: verbatim text with outer blank lines trimmed.
    Prose,
    /// `"array"`: bullet items, tolerating missing bullet markers.
    List,
    /// `"object"`: allow-listed key/value fields plus free notes.
    Kv,
    /// `"array"` on the exits section: strict direction → target lines.
    Exits,
}

impl SectionKind {
    fn from_declared(section: &str, declared: Option<&Value>) -> Result<Self, SchemaError> {
        match declared.and_then(Value::as_str) {
            Some("string") => Ok(Self::Prose),
            Some("object") => Ok(Self::Kv),
            Some("array") if section == EXITS_SECTION => Ok(Self::Exits),
            Some("array") => Ok(Self::List),
            _ => Err(SchemaError::UnsupportedSectionType {
                section: section.to_string(),
                found: declared.map_or_else(|| "<none>".to_string(), Value::to_string),
            }),
        }
    }
}

/// The grammar derived from a room schema document.
#[derive(Debug, Clone)]
pub struct RoomSchema {
    title_pattern: String,
    title_regex: Regex,
    section_order: Vec<String>,
    section_types: HashMap<String, SectionKind>,
}

impl RoomSchema {
    /// Loads and derives the grammar from a schema file.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        Self::from_json_schema(&read_schema_document(path)?)
    }

    /// Derives the grammar from an already parsed schema document.
    pub fn from_json_schema(schema: &Value) -> Result<Self, SchemaError> {
        if !schema.is_object() {
            return Err(SchemaError::RootNotObject);
        }

        let title_pattern = schema
            .pointer("/properties/title/pattern")
            .ok_or(SchemaError::Missing(TITLE_PATTERN))?
            .as_str()
            .filter(|p| !p.trim().is_empty())
            .ok_or(SchemaError::WrongShape {
                location: TITLE_PATTERN,
                expected: "a non-empty string",
            })?
            .to_string();
        let title_regex = Regex::new(&title_pattern)
            .map_err(|source| SchemaError::InvalidTitlePattern { source })?;

        let section_order = string_list(
            schema.pointer("/properties/section_order/const"),
            SECTION_ORDER,
        )?;
        let duplicates = duplicated(&section_order);
        if !duplicates.is_empty() {
            return Err(SchemaError::DuplicateSections(duplicates));
        }

        let required = string_list(
            schema.pointer("/properties/sections/required"),
            REQUIRED_SECTIONS,
        )?;
        if required != section_order {
            return Err(SchemaError::Drift {
                required,
                section_order,
            });
        }

        let definitions = schema
            .pointer("/properties/sections/properties")
            .ok_or(SchemaError::Missing(SECTION_PROPERTIES))?
            .as_object()
            .ok_or(SchemaError::WrongShape {
                location: SECTION_PROPERTIES,
                expected: "an object",
            })?;

        let mut section_types = HashMap::with_capacity(section_order.len());
        for section in &section_order {
            // Names may contain '/', so these are looked up directly rather than via a pointer.
            let definition = definitions
                .get(section)
                .ok_or_else(|| SchemaError::MissingSectionDefinition(section.clone()))?;
            let kind = SectionKind::from_declared(section, definition.get("type"))?;
            section_types.insert(section.clone(), kind);
        }

        Ok(Self {
            title_pattern,
            title_regex,
            section_order,
            section_types,
        })
    }

    pub fn title_pattern(&self) -> &str {
        &self.title_pattern
    }

    /// Whether `title` matches the title pattern from its first character.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title_regex
            .find(title)
            .is_some_and(|m| m.start() == 0)
    }

    pub fn section_order(&self) -> &[String] {
        &self.section_order
    }

    pub fn kind_of(&self, section: &str) -> Option<SectionKind> {
        self.section_types.get(section).copied()
    }

    pub fn contains_section(&self, section: &str) -> bool {
        self.section_types.contains_key(section)
    }
}

/// Reads a schema file into a generic JSON tree.
///
/// Used both for grammar derivation and by the record validator, which needs
/// the full schema document.
pub fn read_schema_document(path: &Path) -> Result<Value, SchemaError> {
    if !path.exists() {
        return Err(SchemaError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| SchemaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SchemaError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

fn string_list(value: Option<&Value>, location: &'static str) -> Result<Vec<String>, SchemaError> {
    let items = value
        .ok_or(SchemaError::Missing(location))?
        .as_array()
        .ok_or(SchemaError::WrongShape {
            location,
            expected: "a list of strings",
        })?;

    let mut names = Vec::with_capacity(items.len());
    for item in items {
        let name = item.as_str().ok_or(SchemaError::WrongShape {
            location,
            expected: "a list of strings",
        })?;
        let name = name.trim();
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }
    Ok(names)
}

fn duplicated(names: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut dups = BTreeSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            dups.insert(name.clone());
        }
    }
    dups.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::sample_schema_json;
    use serde_json::json;

    #[test]
    fn derives_order_and_kinds_from_schema() {
        let schema = RoomSchema::from_json_schema(&sample_schema_json()).unwrap();

        assert_eq!(schema.section_order().len(), 9);
        assert_eq!(schema.section_order()[0], "Description (verbatim)");
        assert_eq!(schema.kind_of("Description (verbatim)"), Some(SectionKind::Prose));
        assert_eq!(schema.kind_of("Exits (as reported)"), Some(SectionKind::Exits));
        assert_eq!(schema.kind_of("Objects present"), Some(SectionKind::List));
        assert_eq!(schema.kind_of("Mapping notes"), Some(SectionKind::Kv));
        assert_eq!(schema.kind_of("Appendix"), None);
    }

    #[test]
    fn title_pattern_is_anchored_at_start() {
        let schema = RoomSchema::from_json_schema(&json!({
            "properties": {
                "title": { "pattern": "Z1 - " },
                "section_order": { "const": ["Body"] },
                "sections": {
                    "required": ["Body"],
                    "properties": { "Body": { "type": "string" } }
                }
            }
        }))
        .unwrap();

        assert!(schema.title_matches("Z1 - Cellar"));
        assert!(!schema.title_matches("Cellar Z1 - "));
    }

    #[test]
    fn rejects_required_list_that_omits_a_section() {
        let mut doc = sample_schema_json();
        doc["properties"]["sections"]["required"]
            .as_array_mut()
            .unwrap()
            .remove(2);

        let err = RoomSchema::from_json_schema(&doc).unwrap_err();
        assert!(matches!(err, SchemaError::Drift { .. }));
        assert!(err.to_string().starts_with("Schema drift"));
    }

    #[test]
    fn rejects_required_list_that_reorders_sections() {
        let mut doc = sample_schema_json();
        doc["properties"]["sections"]["required"]
            .as_array_mut()
            .unwrap()
            .swap(0, 1);

        let err = RoomSchema::from_json_schema(&doc).unwrap_err();
        assert!(matches!(err, SchemaError::Drift { .. }));
    }

    #[test]
    fn rejects_duplicate_section_names() {
        let doc = json!({
            "properties": {
                "title": { "pattern": "^Z1 - .+$" },
                "section_order": { "const": ["A", "B", "A"] },
                "sections": { "required": ["A", "B", "A"], "properties": {} }
            }
        });

        let err = RoomSchema::from_json_schema(&doc).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateSections(ref d) if d == &["A".to_string()]));
    }

    #[test]
    fn rejects_missing_title_pattern() {
        let mut doc = sample_schema_json();
        doc["properties"]["title"] = json!({ "type": "string" });

        let err = RoomSchema::from_json_schema(&doc).unwrap_err();
        assert!(matches!(err, SchemaError::Missing(TITLE_PATTERN)));
    }

    #[test]
    fn rejects_blank_title_pattern() {
        let mut doc = sample_schema_json();
        doc["properties"]["title"]["pattern"] = json!("   ");

        let err = RoomSchema::from_json_schema(&doc).unwrap_err();
        assert!(matches!(err, SchemaError::WrongShape { .. }));
    }

    #[test]
    fn rejects_unsupported_section_type() {
        let mut doc = sample_schema_json();
        doc["properties"]["sections"]["properties"]["Hazards/NPCs"] = json!({ "type": "integer" });

        let err = RoomSchema::from_json_schema(&doc).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnsupportedSectionType { ref section, .. } if section == "Hazards/NPCs"
        ));
    }

    #[test]
    fn rejects_missing_section_definition() {
        let mut doc = sample_schema_json();
        doc["properties"]["sections"]["properties"]
            .as_object_mut()
            .unwrap()
            .remove("State notes");

        let err = RoomSchema::from_json_schema(&doc).unwrap_err();
        assert!(matches!(err, SchemaError::MissingSectionDefinition(ref s) if s == "State notes"));
    }

    #[test]
    fn exits_kind_is_keyed_by_name_only_for_arrays() {
        let mut doc = sample_schema_json();
        doc["properties"]["sections"]["properties"]["Exits (as reported)"] = json!({ "type": "string" });

        let schema = RoomSchema::from_json_schema(&doc).unwrap();
        assert_eq!(schema.kind_of("Exits (as reported)"), Some(SectionKind::Prose));
    }

    #[test]
    fn reports_missing_and_invalid_schema_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("absent.json");
        assert!(matches!(RoomSchema::load(&missing), Err(SchemaError::NotFound(_))));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            RoomSchema::load(&broken),
            Err(SchemaError::InvalidJson { .. })
        ));
    }
}
