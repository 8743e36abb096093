/// Bullet item markers for list-shaped sections.
pub struct Bullet;

impl Bullet {
    pub const MARKERS: [char; 2] = ['-', '*'];

    /// Item text of a bullet line, trimmed.
    ///
    /// The marker may be indented and must be followed by whitespace and some
    /// text, so `**bold**` and a lone `-` are not bullets.
    pub fn item(line: &str) -> Option<&str> {
        let rest = line.trim_start().strip_prefix(Self::MARKERS)?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let item = rest.trim();
        (!item.is_empty()).then_some(item)
    }
}

/// Parses a list section: one element per non-blank line.
///
/// Lines without a bullet marker are kept whole (trimmed) instead of failing
/// the document.
pub fn parse_list(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| Bullet::item(line).unwrap_or_else(|| line.trim()).to_string())
        .collect()
}
