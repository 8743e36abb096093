pub mod blocks;
pub mod sections;
pub mod wikilink;

pub use blocks::{ParsedDocument, StructureError, enforce_section_order, split_into_blocks};
pub use sections::{SectionError, parse_sections};

use crate::schema::RoomSchema;

/// Splits a document and checks its headings against the schema's section order.
pub fn parse_document(text: &str, schema: &RoomSchema) -> Result<ParsedDocument, StructureError> {
    let doc = split_into_blocks(text)?;
    enforce_section_order(&doc, schema)?;
    Ok(doc)
}
