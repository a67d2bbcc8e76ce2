//! Reversible escaping of bracket literals that are not tree structure
//!
//! Tree-bank lines can carry the literal tokens `(_` and `)_` inside leaves.
//! The bracket parser would read them as structure, so they are swapped for
//! private-use placeholders before parsing and swapped back afterwards.
//! Both directions walk the same table.

/// Placeholder for a literal `(_`.
const OPEN_PLACEHOLDER: &str = "\u{E000}";
/// Placeholder for a literal `)_`.
const CLOSE_PLACEHOLDER: &str = "\u{E001}";

/// Ordered `(literal, placeholder)` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeTable {
    entries: &'static [(&'static str, &'static str)],
}

/// Escapes applied to tree text before bracket parsing.
pub const PARSE_ESCAPES: EscapeTable = EscapeTable::new(&[
    ("(_", OPEN_PLACEHOLDER),
    (")_", CLOSE_PLACEHOLDER),
]);

impl EscapeTable {
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Replace every literal with its placeholder.
    pub fn escape(&self, s: &str) -> String {
        self.entries
            .iter()
            .fold(s.to_string(), |acc, (literal, placeholder)| {
                acc.replace(literal, placeholder)
            })
    }

    /// Replace every placeholder with its literal.
    ///
    /// Inverse of [`EscapeTable::escape`] for any input without placeholder characters.
    pub fn unescape(&self, s: &str) -> String {
        self.entries
            .iter()
            .rev()
            .fold(s.to_string(), |acc, (literal, placeholder)| {
                acc.replace(placeholder, literal)
            })
    }

    /// Byte offset of the first placeholder already present in `s`.
    ///
    /// Such text would not round-trip.
    pub fn find_placeholder(&self, s: &str) -> Option<usize> {
        self.entries
            .iter()
            .filter_map(|(_, placeholder)| s.find(placeholder))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("(X (_ ))", "(X \u{E000} ))")]
    #[case("(X )_ )", "(X \u{E001} )")]
    #[case("(NP (NN cat))", "(NP (NN cat))")]
    fn test_escape(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(PARSE_ESCAPES.escape(input), expected);
    }

    #[test]
    fn test_escaped_text_has_no_structural_literal() {
        let escaped = PARSE_ESCAPES.escape("(X (_ a )_)");
        assert!(!escaped.contains("(_"));
        assert!(!escaped.contains(")_"));
        assert_eq!(escaped.matches('(').count(), 1);
        assert_eq!(escaped.matches(')').count(), 1);
    }

    #[test]
    fn test_unescape_restores_literals() {
        let original = "(X (_ a )_)";
        assert_eq!(PARSE_ESCAPES.unescape(&PARSE_ESCAPES.escape(original)), original);
    }

    #[test]
    fn test_find_placeholder() {
        assert_eq!(PARSE_ESCAPES.find_placeholder("ab\u{E001}c\u{E000}"), Some(2));
        assert_eq!(PARSE_ESCAPES.find_placeholder("(_ )_"), None);
    }
}
