/// Parses a prose section into a single string.
///
/// Leading and trailing blank lines are dropped; interior blank lines and
/// line breaks are kept verbatim.
pub fn parse_prose(lines: &[String]) -> String {
    let is_blank = |line: &String| line.trim().is_empty();
    let start = lines.iter().position(|l| !is_blank(l)).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !is_blank(l)).map_or(start, |i| i + 1);

    lines[start..end].join("\n").trim().to_string()
}
