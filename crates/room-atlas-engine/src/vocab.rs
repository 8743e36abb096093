//! Fixed vocabulary of the room notes format.
//!
//! Section names, keys and tokens that the schema cannot express on its own.
//! Everything else about the grammar comes from the loaded [`RoomSchema`].
//!
//! [`RoomSchema`]: crate::schema::RoomSchema

/// World prefix used in canonical titles and wikilink targets.
pub const WORLD_PREFIX: &str = "Z1";

/// Prefix prepended to a bare heading when repairing a title.
pub const TITLE_PREFIX: &str = "Z1 - ";

/// The array-typed section that uses the exits grammar instead of a plain list.
pub const EXITS_SECTION: &str = "Exits (as reported)";

/// Receives the annotation notes extracted from exit lines.
pub const TRANSITIONS_SECTION: &str = "Hidden/conditional transitions";

/// Always-synthesized field of key/value sections holding unstructured lines.
pub const NOTES_FIELD: &str = "Notes";

pub const INTERNAL_ID: &str = "Internal ID";
pub const FIRST_MAPPED: &str = "First mapped";
pub const REVISIONS: &str = "Revisions";

/// Keys kept as structured fields in key/value sections.
pub const MAPPING_KEYS: [&str; 3] = [INTERNAL_ID, FIRST_MAPPED, REVISIONS];

/// Keys that must carry a value when they appear at all.
pub const NON_EMPTY_KEYS: [&str; 2] = [INTERNAL_ID, FIRST_MAPPED];

/// Exit lines meaning "no exits"; skipped rather than parsed.
pub const EXIT_PLACEHOLDERS: [&str; 4] = ["None", "(none)", "*", "-"];

/// Longest key accepted by the plain `Key: Value` form.
pub const MAX_PLAIN_KEY_CHARS: usize = 60;
