use crate::vocab::WORLD_PREFIX;

/// `[[target]]` references between room documents.
///
/// Owns the link delimiters; parsers never hardcode `[[` or `]]`.
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static str = "[[";
    pub const CLOSE: &'static str = "]]";

    /// Inner text of a whole-string wikilink, trimmed.
    pub fn inner(link: &str) -> Option<&str> {
        let inner = link
            .trim()
            .strip_prefix(Self::OPEN)?
            .strip_suffix(Self::CLOSE)?
            .trim();
        (!inner.is_empty()).then_some(inner)
    }

    /// Rewrites a world-prefixed target to the canonical `[[Z1 - rest]]` form.
    ///
    /// Spacing around the dash is normalized and `rest` is trimmed. Links
    /// without the world prefix keep their (trimmed) inner text, and strings
    /// that are not a wikilink at all are returned trimmed.
    pub fn canonicalize(link: &str) -> String {
        let Some(inner) = Self::inner(link) else {
            return link.trim().to_string();
        };

        match Self::world_rest(inner) {
            Some(rest) => format!("{}{WORLD_PREFIX} - {rest}{}", Self::OPEN, Self::CLOSE),
            None => format!("{}{inner}{}", Self::OPEN, Self::CLOSE),
        }
    }

    fn world_rest(inner: &str) -> Option<&str> {
        let rest = inner
            .strip_prefix(WORLD_PREFIX)?
            .trim_start()
            .strip_prefix('-')?
            .trim();
        (!rest.is_empty()).then_some(rest)
    }
}
