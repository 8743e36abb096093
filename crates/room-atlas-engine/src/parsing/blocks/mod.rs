//! # Block Splitting
//!
//! Two-phase splitting of a room document into a title and `##` blocks.
//!
//! 1. **Line Classification** (`classify`): each line becomes a `LineClass`
//!    (blank, title heading, section heading, text) from local facts only.
//! 2. **Block Construction** (`builder`): a `BlockBuilder` state machine
//!    enforces the heading grammar and collects raw lines per block.
//!
//! The section vocabulary is checked afterwards by [`enforce_section_order`],
//! against the order derived from the schema.
//!
//! ## Key Invariants
//!
//! - Exactly one `#` heading, before any `##` heading
//! - Nothing but blank lines between the title and the first section
//! - Section names are unique within a document

pub mod builder;
pub mod classify;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{HeadingClassifier, LineClass};
pub use types::{Block, ParsedDocument};

use thiserror::Error;

use crate::schema::RoomSchema;

/// Heading grammar violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("Missing H1 '# ...' title")]
    MissingTitle,

    #[error("Expected H1 '# ...' near top (line {line}). Found: {found:?}")]
    MalformedTitle { line: usize, found: String },

    #[error("Only one H1 heading is allowed (second H1 at line {line})")]
    SecondTitle { line: usize },

    #[error("Content found before first H2 section (line {line})")]
    Preamble { line: usize },

    #[error("Duplicate H2 heading {name:?} (line {line}, first at line {first_line})")]
    DuplicateSection {
        name: String,
        line: usize,
        first_line: usize,
    },

    #[error("Extra H2 headings not allowed: {0:?}")]
    ExtraSections(Vec<String>),

    #[error("Missing required H2 headings: {0:?}")]
    MissingSections(Vec<String>),

    #[error("H2 order mismatch.\nExpected: {expected:?}\nFound:    {found:?}")]
    OrderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// Splits document text into its title and section blocks.
///
/// Line endings are normalized first, so CRLF and bare CR documents split the
/// same way as LF ones.
pub fn split_into_blocks(text: &str) -> Result<ParsedDocument, StructureError> {
    let text = normalize_newlines(text);
    let classifier = HeadingClassifier;
    let mut builder = BlockBuilder::new();

    for (idx, line) in text.lines().enumerate() {
        let class = classifier.classify(line);
        builder.push(idx + 1, line, &class)?;
    }

    builder.finish()
}

/// Checks the encountered headings against the schema's canonical order.
///
/// Extra headings, missing headings and reordering are reported as distinct
/// errors, in that order of precedence.
pub fn enforce_section_order(doc: &ParsedDocument, schema: &RoomSchema) -> Result<(), StructureError> {
    let found = doc.heading_order();

    let extras: Vec<String> = found
        .iter()
        .filter(|name| !schema.contains_section(name))
        .map(|name| name.to_string())
        .collect();
    if !extras.is_empty() {
        return Err(StructureError::ExtraSections(extras));
    }

    let missing: Vec<String> = schema
        .section_order()
        .iter()
        .filter(|name| doc.block(name).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(StructureError::MissingSections(missing));
    }

    if found.iter().copied().ne(schema.section_order().iter().map(String::as_str)) {
        return Err(StructureError::OrderMismatch {
            expected: schema.section_order().to_vec(),
            found: found.iter().map(|s| s.to_string()).collect(),
        });
    }

    Ok(())
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
