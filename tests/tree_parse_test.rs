//! Tests for bracketed tree parsing and the escape table

use proptest::prelude::*;
use rstest::rstest;

use treedraw::domain::{DomainError, Record, Tree, PARSE_ESCAPES};

// ============================================================
// Parsing
// ============================================================

#[test]
fn given_penn_style_tree_when_parsing_then_leaves_and_height_match() {
    // Arrange
    let text = "(ROOT (S (NP (PRP We)) (VP (VBD saw) (NP (DT a) (NN tree))) (. .)))";

    // Act
    let tree = Tree::parse(text).unwrap();

    // Assert
    assert_eq!(tree.leaves(), vec!["We", "saw", "a", "tree", "."]);
    assert_eq!(tree.height(), 6);
    assert_eq!(tree.to_string(), text);
}

#[test]
fn given_record_line_when_parsing_tree_part_then_tokens_need_not_match_leaves() {
    let record = Record::parse("(S (X a) (Y b) (Z c)) ||||| only two").unwrap();
    let tree = Tree::parse_escaped(&record.tree_text, &PARSE_ESCAPES).unwrap();

    assert_eq!(tree.leaves().len(), 3);
    assert_eq!(record.tokens.len(), 2);
}

#[rstest]
#[case("(S (NP a)")]
#[case("(S a))")]
#[case(")(")]
#[case("word")]
#[case("")]
fn given_malformed_brackets_when_parsing_then_malformed_tree(#[case] text: &str) {
    let err = Tree::parse(text).unwrap_err();
    assert!(
        matches!(err, DomainError::MalformedTree { .. }),
        "{:?} gave {:?}",
        text,
        err
    );
}

#[test]
fn given_parsed_tree_when_taking_anchor_positions_then_tree_is_unchanged() {
    let tree = Tree::parse("(S (A a) (B b))").unwrap();
    let before = tree.clone();

    let (first, last) = tree.anchor_positions().unwrap();

    assert_eq!(tree.get(&first), Some(&Tree::leaf("a")));
    assert_eq!(tree.get(&last), Some(&Tree::leaf("b")));
    assert_eq!(tree, before);
}

#[test]
fn given_literal_bracket_leaves_when_parsing_escaped_then_leaves_keep_literals() {
    let tree = Tree::parse_escaped("(S (L (_) (M x) (R )_))", &PARSE_ESCAPES).unwrap();

    assert_eq!(tree.leaves(), vec!["(_", "x", ")_"]);
    assert_eq!(
        tree,
        Tree::node(
            "S",
            vec![
                Tree::node("L", vec![Tree::leaf("(_")]),
                Tree::node("M", vec![Tree::leaf("x")]),
                Tree::node("R", vec![Tree::leaf(")_")]),
            ]
        )
    );
}

// ============================================================
// Escape table round trip
// ============================================================

proptest! {
    #[test]
    fn escape_then_unescape_is_identity(s in "[ a-z()_|$]{0,40}") {
        prop_assert_eq!(PARSE_ESCAPES.unescape(&PARSE_ESCAPES.escape(&s)), s);
    }

    #[test]
    fn escaped_text_has_no_bracket_literals(s in "[ a-z()_]{0,40}") {
        let escaped = PARSE_ESCAPES.escape(&s);
        prop_assert!(!escaped.contains("(_"));
        prop_assert!(!escaped.contains(")_"));
    }
}
