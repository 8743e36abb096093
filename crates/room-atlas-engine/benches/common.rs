// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use serde_json::{Value, json};

const SECTIONS: [&str; 9] = [
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

#[allow(dead_code)]
pub fn room_schema() -> Value {
    let mut properties = serde_json::Map::new();
    for name in SECTIONS {
        let kind = match name {
            "Description (verbatim)" => "string",
            "Mapping notes" => "object",
            _ => "array",
        };
        properties.insert(name.to_string(), json!({ "type": kind }));
    }
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "pattern": "^Z1 - .+$" },
            "section_order": { "const": SECTIONS },
            "sections": { "type": "object", "required": SECTIONS, "properties": properties }
        }
    })
}

/// A room note with `exits` exit lines, every fourth one annotated.
#[allow(dead_code)]
pub fn generate_room(title: &str, exits: usize) -> String {
    let mut content = format!("# {title}\n\n## Description (verbatim)\n\n");
    content.push_str("You are in a maze of twisty little passages, all alike.\n\n");

    content.push_str("## Exits (as reported)\n");
    let directions = ["N", "S", "E", "W", "NE", "NW", "SE", "SW", "U", "D"];
    for i in 0..exits {
        let dir = directions[i % directions.len()];
        if i % 4 == 0 {
            content.push_str(&format!("- {dir} (one way) → [[Z1 -  Maze {i}]]\n"));
        } else {
            content.push_str(&format!("- {dir} → [[Z1-Maze {i}]]\n"));
        }
    }

    content.push_str("\n## Blocked movements\n- None\n");
    content.push_str("\n## Hidden/conditional transitions\n- None\n");
    content.push_str("\n## Objects present\n- Skeleton key\n- Rusty knife\n");
    content.push_str("\n## Hazards/NPCs\n- Thief\n");
    content.push_str("\n## Key parser interactions\n- DROP ALL\n");
    content.push_str("\n## State notes\n- None\n");
    content.push_str("\n## Mapping notes\n**Internal ID**: Z1-R-42\nFirst mapped: 2024-03-02\nDead end loop.\n");
    content
}
