use std::fs;
use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;

use crate::schema::RoomSchema;

/// Create a temporary rooms (or output) directory
pub fn create_test_rooms_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a test file with content
pub fn create_test_file(rooms_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = rooms_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

const SAMPLE_SECTIONS: [&str; 9] = [
    "Description (verbatim)",
    "Exits (as reported)",
    "Blocked movements",
    "Hidden/conditional transitions",
    "Objects present",
    "Hazards/NPCs",
    "Key parser interactions",
    "State notes",
    "Mapping notes",
];

fn string_list() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

/// A complete room schema in the shape the normalizer derives its grammar from.
pub fn sample_schema_json() -> Value {
    let mut sections = serde_json::Map::new();
    sections.insert(SAMPLE_SECTIONS[0].into(), json!({ "type": "string" }));
    sections.insert(
        SAMPLE_SECTIONS[1].into(),
        json!({
            "type": "array",
            "items": { "type": "string", "pattern": " → \\[\\[Z1 - .+\\]\\]$" }
        }),
    );
    for name in &SAMPLE_SECTIONS[2..8] {
        sections.insert(name.to_string(), string_list());
    }
    sections.insert(
        SAMPLE_SECTIONS[8].into(),
        json!({
            "type": "object",
            "properties": {
                "Internal ID": { "type": "string", "pattern": "^Z1-R-[0-9]{3,}$" },
                "First mapped": { "type": "string" },
                "Revisions": { "type": "string" },
                "Notes": string_list()
            },
            "required": ["Notes"],
            "additionalProperties": false
        }),
    );

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["title", "sections", "section_order"],
        "additionalProperties": false,
        "properties": {
            "title": { "type": "string", "pattern": "^Z1 - .+$" },
            "section_order": { "const": SAMPLE_SECTIONS },
            "sections": {
                "type": "object",
                "required": SAMPLE_SECTIONS,
                "additionalProperties": false,
                "properties": sections
            }
        }
    })
}

pub fn sample_schema() -> RoomSchema {
    RoomSchema::from_json_schema(&sample_schema_json()).unwrap()
}

/// A well-formed room note for `Z1 - Cellar` against [`sample_schema`].
pub fn sample_room_markdown() -> String {
    "# Z1 - Cellar

## Description (verbatim)

You are in a dark and damp cellar.

A narrow passageway leads south.

## Exits (as reported)
- N (if door open) → [[Z1 -  Attic]]
- S → [[Z1 - Kitchen]]

## Blocked movements
- E: the wall is solid rock

## Hidden/conditional transitions
- Trapdoor closes behind you

## Objects present
- Lantern
* Rusty knife

## Hazards/NPCs
- Grue (in darkness)

## Key parser interactions
- MOVE RUG reveals nothing here

## State notes
- None

## Mapping notes
- **Internal ID**: Z1-R-7
- First mapped: session 1
- Reached by the trapdoor from the living room.
"
    .to_string()
}
