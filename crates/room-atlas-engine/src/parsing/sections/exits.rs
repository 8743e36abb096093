use std::fmt;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::{SectionError, list::parse_list};
use crate::parsing::wikilink::WikiLink;
use crate::vocab::{EXIT_PLACEHOLDERS, WORLD_PREFIX};

/// The arrow separating a direction from its target.
pub const ARROW: &str = "→";

const DIRECTIONS: &str = "NE|NW|SE|SW|N|S|E|W|U|D";
const COMMANDS: &str = "WAIT|LAND|LAUNCH";

/// A direction or command token, optionally paired with a second direction
/// (`N/E`). The pair is kept as written; it carries no further meaning here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Direction {
    pub token: String,
    pub paired: Option<String>,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.paired {
            Some(second) => write!(f, "{}/{second}", self.token),
            None => f.write_str(&self.token),
        }
    }
}

/// One parsed exit line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitEntry {
    pub direction: Direction,
    /// Canonical `[[Z1 - rest]]` target.
    pub target: String,
    /// Prefix, inline and trailing annotations, in that order.
    pub annotations: Vec<String>,
}

impl ExitEntry {
    /// Canonical entry string, e.g. `N → [[Z1 - Attic]]`.
    pub fn canonical(&self) -> String {
        format!("{} {ARROW} {}", self.direction, self.target)
    }

    /// Transition note for this exit, if it had any annotations.
    pub fn condition_note(&self) -> Option<String> {
        if self.annotations.is_empty() {
            return None;
        }
        Some(format!(
            "Exit condition for {}: {}",
            self.canonical(),
            self.annotations.join(" ")
        ))
    }
}

/// Canonical exit entries plus the condition notes extracted from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedExits {
    pub entries: Vec<String>,
    pub notes: Vec<String>,
}

/// Parses an exits section.
///
/// Unlike plain lists, every non-placeholder line must match the exit grammar.
pub fn parse_exits(lines: &[String]) -> Result<ParsedExits, SectionError> {
    let mut parsed = ParsedExits::default();

    for item in parse_list(lines) {
        if EXIT_PLACEHOLDERS.contains(&item.as_str()) {
            continue;
        }
        let exit = parse_exit_line(&item)?;
        parsed.entries.push(exit.canonical());
        parsed.notes.extend(exit.condition_note());
    }

    Ok(parsed)
}

/// Parses one exit candidate (bullet marker already removed).
pub fn parse_exit_line(line: &str) -> Result<ExitEntry, SectionError> {
    let caps = exit_regex()
        .captures(line)
        .ok_or_else(|| SectionError::UnrecognizedExit(line.to_string()))?;

    let direction = Direction {
        token: caps["token"].to_string(),
        paired: caps.name("paired").map(|m| m.as_str().to_string()),
    };
    let target = WikiLink::canonicalize(&caps["link"]);
    let annotations = ["prefix", "inline", "trailing"]
        .into_iter()
        .filter_map(|group| annotation(&caps, group))
        .collect();

    Ok(ExitEntry {
        direction,
        target,
        annotations,
    })
}

fn annotation(caps: &Captures, group: &str) -> Option<String> {
    let text = caps.name(group)?.as_str().trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn exit_regex() -> &'static Regex {
    static EXIT_RE: OnceLock<Regex> = OnceLock::new();
    EXIT_RE.get_or_init(|| {
        let pattern = format!(
            r"(?x)
            ^\s*
            (?P<prefix>\([^)]*\)\s*)?
            (?P<token>{DIRECTIONS}|{COMMANDS})
            (?:/(?P<paired>{DIRECTIONS}))?
            (?P<inline>\s*\([^)]*\)\s*)?
            (?:\s*:)?\s*
            {ARROW}\s*
            (?P<link>\[\[{WORLD_PREFIX}\s*-\s*[^\]]+\]\])
            (?P<trailing>\s+.*)?\s*$"
        );
        Regex::new(&pattern).expect("Invalid exit regex")
    })
}
