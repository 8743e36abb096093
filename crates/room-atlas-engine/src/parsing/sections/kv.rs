use std::sync::OnceLock;

use regex::Regex;

use super::{SectionError, list::Bullet};
use crate::models::{FieldValue, OrderedMap};
use crate::vocab::{INTERNAL_ID, MAPPING_KEYS, MAX_PLAIN_KEY_CHARS, NON_EMPTY_KEYS, NOTES_FIELD};

/// Parses a key/value section.
///
/// Allow-listed keys become structured fields in encounter order; every other
/// non-blank line lands in the always-present `Notes` list, which comes last.
pub fn parse_kv(lines: &[String]) -> Result<OrderedMap<FieldValue>, SectionError> {
    let mut fields = OrderedMap::new();
    let mut notes = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let text = Bullet::item(line).unwrap_or(line);

        match split_key_value(text) {
            Some((key, value)) if MAPPING_KEYS.contains(&key.as_str()) => {
                let value = if key == INTERNAL_ID {
                    canonicalize_internal_id(&value)
                } else {
                    value
                };
                if value.is_empty() && NON_EMPTY_KEYS.contains(&key.as_str()) {
                    return Err(SectionError::EmptyRequiredField(key));
                }
                fields.insert(key, FieldValue::Text(value));
            }
            _ => notes.push(strip_bold(text)),
        }
    }

    fields.insert(NOTES_FIELD, FieldValue::Items(notes));
    Ok(fields)
}

/// Splits `**Key**: Value`, `**Key:** Value` or `Key: Value` into a cleaned
/// key and value.
fn split_key_value(text: &str) -> Option<(String, String)> {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    static PLAIN: OnceLock<Regex> = OnceLock::new();

    let bold = BOLD.get_or_init(|| {
        Regex::new(r"^\*\*(?P<key>[^*:]+?)\s*(?::\*\*|\*\*\s*:)\s*(?P<val>.*)$")
            .expect("Invalid bold key/value regex")
    });
    let plain = PLAIN.get_or_init(|| {
        Regex::new(&format!(r"^(?P<key>[^:]{{1,{MAX_PLAIN_KEY_CHARS}}}):\s*(?P<val>.*)$"))
            .expect("Invalid plain key/value regex")
    });

    let caps = bold.captures(text).or_else(|| plain.captures(text))?;
    let key = collapse_whitespace(&strip_bold(&caps["key"]).replace('*', ""));
    let value = strip_bold(&caps["val"]);
    Some((key, value))
}

/// `Z1-R-7` → `Z1-R-007`; anything else passes through trimmed.
pub fn canonicalize_internal_id(value: &str) -> String {
    static INTERNAL_ID_RE: OnceLock<Regex> = OnceLock::new();
    let re = INTERNAL_ID_RE
        .get_or_init(|| Regex::new(r"^Z1-R-([0-9]{1,3})$").expect("Invalid internal ID regex"));

    let value = value.trim();
    match re.captures(value).and_then(|c| c[1].parse::<u32>().ok()) {
        Some(n) => format!("Z1-R-{n:03}"),
        None => value.to_string(),
    }
}

/// Removes one layer of surrounding `**` and any stray edge asterisks.
fn strip_bold(text: &str) -> String {
    let mut s = text.trim();
    if s.len() >= 4
        && let Some(inner) = s.strip_prefix("**").and_then(|t| t.strip_suffix("**"))
    {
        s = inner.trim();
    }
    s.trim_matches('*').trim().to_string()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
