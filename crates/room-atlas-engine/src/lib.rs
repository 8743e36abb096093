pub mod gate;
pub mod io;
pub mod models;
pub mod parsing;
pub mod pipeline;
pub mod schema;
pub mod title;
pub mod validate;
pub mod vocab;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use gate::{Drift, GateError, GateReport, check_consistency};
pub use io::*;
pub use models::{FieldValue, NormalizedRoom, RoomFile, SectionValue};
pub use pipeline::{
    DocumentError, DocumentErrorKind, NormalizeOptions, Pipeline, RunError, RunReport, normalize_document,
    normalize_text,
};
pub use schema::{DEFAULT_SCHEMA_PATH, RoomSchema, SchemaError, read_schema_document};
pub use title::{TitleError, TitleFix};
pub use validate::{RecordValidator, RecordViolations, ValidationError, Violation};
