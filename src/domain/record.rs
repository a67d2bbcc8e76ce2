//! Tree-bank record: one line holding a bracketed tree and its alignment tokens

use crate::domain::{DomainError, DomainResult};

/// Separator between the tree and the token list on a tree-bank line.
pub const RECORD_DELIMITER: &str = " ||||| ";

/// One tree-bank line split into its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Bracketed tree text, unescaped
    pub tree_text: String,
    /// Surface tokens in order
    pub tokens: Vec<String>,
}

impl Record {
    /// Parse a tree-bank line.
    ///
    /// The first field is the tree, the second the whitespace separated tokens.
    /// Any further fields are ignored.
    pub fn parse(line: &str) -> DomainResult<Self> {
        let mut fields = line.split(RECORD_DELIMITER);
        let tree_text = fields.next().unwrap_or_default();
        let token_text = fields.next().ok_or_else(|| DomainError::MalformedRecord {
            message: format!("missing '{}' delimiter", RECORD_DELIMITER.trim()),
        })?;

        let tokens: Vec<String> = token_text.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Err(DomainError::MalformedRecord {
                message: "alignment token list is empty".to_string(),
            });
        }

        Ok(Self {
            tree_text: tree_text.to_string(),
            tokens,
        })
    }

    /// Index of the last token.
    pub fn last_index(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_tree_and_tokens() {
        let record = Record::parse("(S (NP I) (VP run)) ||||| I run\n").unwrap();
        assert_eq!(record.tree_text, "(S (NP I) (VP run))");
        assert_eq!(record.tokens, vec!["I", "run"]);
        assert_eq!(record.last_index(), 1);
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let record = Record::parse("(X a) ||||| a b ||||| 0-0 1-1").unwrap();
        assert_eq!(record.tokens, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_without_delimiter_fails() {
        let err = Record::parse("(S (NP I))").unwrap_err();
        assert!(matches!(err, DomainError::MalformedRecord { .. }));
    }

    #[test]
    fn test_parse_with_empty_tokens_fails() {
        let err = Record::parse("(S (NP I)) |||||   ").unwrap_err();
        assert!(matches!(err, DomainError::MalformedRecord { .. }));
    }
}
