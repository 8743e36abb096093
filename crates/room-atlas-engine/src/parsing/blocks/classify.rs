/// Classification of a single document line containing only local facts.
///
/// This is phase 1 of block splitting: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Whitespace only.
    Blank,
    /// `# <title>`; carries the trimmed heading text.
    Title(&'a str),
    /// `## <name>`; carries the trimmed section name.
    Section(&'a str),
    /// Anything else, including deeper headings.
    Text,
}

/// Classifies individual lines for the block splitting phase.
pub struct HeadingClassifier;

impl HeadingClassifier {
    pub const TITLE_MARKER: &'static str = "#";
    pub const SECTION_MARKER: &'static str = "##";

    /// Classifies a line (without its line terminator) into a [`LineClass`].
    ///
    /// A heading marker must start the line and be followed by whitespace and
    /// a non-blank name.
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        if line.trim().is_empty() {
            return LineClass::Blank;
        }
        if let Some(name) = Self::heading_text(line, Self::SECTION_MARKER) {
            return LineClass::Section(name);
        }
        if let Some(title) = Self::heading_text(line, Self::TITLE_MARKER) {
            return LineClass::Title(title);
        }
        LineClass::Text
    }

    fn heading_text<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
        let rest = line.strip_prefix(marker)?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let text = rest.trim();
        (!text.is_empty()).then_some(text)
    }
}
