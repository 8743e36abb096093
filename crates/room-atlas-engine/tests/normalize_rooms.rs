use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use room_atlas_engine::{
    DEFAULT_GLOB, NormalizeOptions, Pipeline, RecordValidator, RoomSchema, check_consistency, gate::diff_records,
    read_schema_document,
};

fn fixture(path: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(path)
}

fn schema() -> RoomSchema {
    RoomSchema::load(&fixture("schema/room_schema_v1.0.json")).unwrap()
}

/// Copies the fixture rooms into a scratch directory, optionally converting to CRLF.
fn scratch_rooms(crlf: bool) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for entry in fs::read_dir(fixture("rooms")).unwrap() {
        let path = entry.unwrap().path();
        let mut text = fs::read_to_string(&path).unwrap();
        if crlf {
            text = text.replace('\n', "\r\n");
        }
        fs::write(dir.path().join(path.file_name().unwrap()), text).unwrap();
    }
    dir
}

#[test]
fn fixture_rooms_compile_to_committed_records() {
    let out = tempfile::tempdir().unwrap();
    let schema = schema();

    let report = Pipeline::new(&schema, NormalizeOptions::new(fixture("rooms"), out.path()))
        .run()
        .unwrap();

    assert!(report.is_success(), "{:?}", report.failures);
    assert_eq!(report.ok_count(), 3);
    assert_eq!(diff_records(out.path(), &fixture("normalized")).unwrap(), vec![]);
}

#[test]
fn line_endings_do_not_change_output() {
    let rooms = scratch_rooms(true);
    let out = tempfile::tempdir().unwrap();
    let schema = schema();

    let report = Pipeline::new(&schema, NormalizeOptions::new(rooms.path(), out.path()))
        .run()
        .unwrap();

    assert!(report.is_success(), "{:?}", report.failures);
    assert_eq!(diff_records(out.path(), &fixture("normalized")).unwrap(), vec![]);
}

#[test]
fn normalizing_twice_is_byte_identical() {
    let schema = schema();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    for out in [&first, &second] {
        let report = Pipeline::new(&schema, NormalizeOptions::new(fixture("rooms"), out.path()))
            .run()
            .unwrap();
        assert!(report.is_success());
    }

    assert_eq!(diff_records(first.path(), second.path()).unwrap(), vec![]);
}

#[test]
fn committed_records_pass_the_compile_gate() {
    let schema_path = fixture("schema/room_schema_v1.0.json");
    let document = read_schema_document(&schema_path).unwrap();

    let report = check_consistency(
        &schema(),
        &document,
        &fixture("rooms"),
        &fixture("normalized"),
        DEFAULT_GLOB,
    )
    .unwrap();

    assert!(report.passed(), "{report:?}");
    assert_eq!(report.normalize.total, 3);
}

#[test]
fn committed_records_validate_against_full_schema() {
    let document = read_schema_document(&fixture("schema/room_schema_v1.0.json")).unwrap();
    let validator = RecordValidator::new(&document).unwrap();

    assert_eq!(validator.check_dir(&fixture("normalized")).unwrap(), vec![]);
}

#[test]
fn record_shape_for_west_of_house() {
    let out = tempfile::tempdir().unwrap();
    let schema = schema();
    let mut options = NormalizeOptions::new(fixture("rooms"), out.path());
    options.glob = "*West*.md".to_string();

    Pipeline::new(&schema, options).run().unwrap();
    let record: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("Z1 - West of House.json")).unwrap()).unwrap();

    insta::assert_snapshot!(
        record["sections"]["Hidden/conditional transitions"][1].as_str().unwrap(),
        @"Exit condition for SW → [[Z1 - Stone Barrow]]: (after the barrow opens)"
    );
    assert_eq!(
        record["sections"]["Mapping notes"],
        serde_json::json!({
            "Internal ID": "Z1-R-001",
            "First mapped": "2024-03-02",
            "Revisions": "2",
            "Notes": ["Starting location."]
        })
    );
}

#[test]
fn broken_rooms_are_reported_per_document() {
    let rooms = scratch_rooms(false);
    let out = tempfile::tempdir().unwrap();
    let schema = schema();

    let kitchen = rooms.path().join("Z1 - Kitchen.md");
    let text = fs::read_to_string(&kitchen).unwrap();
    fs::write(&kitchen, text.replace("* W → [[Z1 - Living Room]]", "* west to the living room")).unwrap();
    fs::write(rooms.path().join("attic.md"), "# Z1 - Attic\n").unwrap();

    let report = Pipeline::new(&schema, NormalizeOptions::new(rooms.path(), out.path()))
        .run()
        .unwrap();

    let messages: Vec<String> = report
        .failures
        .iter()
        .map(|f| format!("{}: {}", f.path.file_name().unwrap().to_string_lossy(), f.kind))
        .collect();
    insta::assert_snapshot!(messages.join("\n"), @r#"
    Z1 - Kitchen.md: Exit line not in canonicalizable form: "west to the living room"
    attic.md: Missing required H2 headings: ["Description (verbatim)", "Exits (as reported)", "Blocked movements", "Hidden/conditional transitions", "Objects present", "Hazards/NPCs", "Key parser interactions", "State notes", "Mapping notes"]
    "#);
    assert_eq!(report.ok_count(), 2);
}
