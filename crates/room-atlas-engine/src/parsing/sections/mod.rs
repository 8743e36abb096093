//! # Section Parsers
//!
//! One micro-parser per [`SectionKind`]. Dispatch is a pure function of the
//! kind the schema declares for a section; no parser looks at section names.
//!
//! - **`prose`**: verbatim text, outer blank lines trimmed
//! - **`list`**: bullet items; unmarked lines are accepted whole
//! - **`kv`**: allow-listed `Key: Value` fields plus free `Notes`
//! - **`exits`**: strict `DIR → [[target]]` lines; never lenient
//!
//! Exit annotations are not stored on the exit entries. They are appended to
//! the transitions section, which must exist and be list-shaped.

pub mod exits;
pub mod kv;
pub mod list;
pub mod prose;

pub use exits::{ARROW, Direction, ExitEntry, ParsedExits, parse_exit_line, parse_exits};
pub use kv::{canonicalize_internal_id, parse_kv};
pub use list::{Bullet, parse_list};
pub use prose::parse_prose;

use thiserror::Error;

use crate::models::{SectionValue, Sections};
use crate::parsing::blocks::ParsedDocument;
use crate::schema::{RoomSchema, SectionKind};
use crate::vocab::TRANSITIONS_SECTION;

/// Section-specific grammar violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("Exit line not in canonicalizable form: {0:?}")]
    UnrecognizedExit(String),

    #[error("Mapping notes: {0} is empty")]
    EmptyRequiredField(String),

    #[error("Schema requires \"Hidden/conditional transitions\" as a list section; could not append exit notes safely")]
    TransitionsNotList,

    #[error("Section {0:?} has no content block")]
    MissingBlock(String),
}

/// Parses every schema section of `doc` into its typed value, in canonical order.
///
/// Expects the document's headings to have passed the order check.
pub fn parse_sections(doc: &ParsedDocument, schema: &RoomSchema) -> Result<Sections, SectionError> {
    let mut sections = Sections::new();
    let mut exit_notes = Vec::new();

    for name in schema.section_order() {
        let lines = doc
            .block(name)
            .map(|b| b.lines.as_slice())
            .ok_or_else(|| SectionError::MissingBlock(name.clone()))?;
        let kind = schema
            .kind_of(name)
            .ok_or_else(|| SectionError::MissingBlock(name.clone()))?;

        let value = match kind {
            SectionKind::Prose => SectionValue::Prose(parse_prose(lines)),
            SectionKind::List => SectionValue::List(parse_list(lines)),
            SectionKind::Kv => SectionValue::Fields(parse_kv(lines)?),
            SectionKind::Exits => {
                let parsed = parse_exits(lines)?;
                exit_notes.extend(parsed.notes);
                SectionValue::List(parsed.entries)
            }
        };
        sections.insert(name.clone(), value);
    }

    if !exit_notes.is_empty() {
        match sections.get_mut(TRANSITIONS_SECTION) {
            Some(SectionValue::List(items)) => items.extend(exit_notes),
            _ => return Err(SectionError::TransitionsNotList),
        }
    }

    Ok(sections)
}
