//! Labelled constituency tree parsed from bracketed notation
//!
//! Bracketed notation nests subtrees in parentheses with the label first:
//! `(S (NP (PRP I)) (VP (VBP run)))`. Labels may be empty (`( (S ...))`),
//! anything that is neither whitespace nor a parenthesis is a leaf.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{DomainError, DomainResult, EscapeTable};

/// Path of child indices from the root to a subtree.
pub type TreePosition = Vec<usize>;

/// Ordered, labelled tree. Internal nodes carry labels, leaves carry tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    Node { label: String, children: Vec<Tree> },
    Leaf(String),
}

/// Open bracket with optional label, close bracket, or leaf.
fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\(\s*([^\s()]+)?|\)|([^\s()]+)").expect("token pattern is valid")
    })
}

fn malformed(message: impl Into<String>, offset: usize) -> DomainError {
    DomainError::MalformedTree {
        message: message.into(),
        offset,
    }
}

impl Tree {
    pub fn node(label: impl Into<String>, children: Vec<Tree>) -> Self {
        Tree::Node {
            label: label.into(),
            children,
        }
    }

    pub fn leaf(text: impl Into<String>) -> Self {
        Tree::Leaf(text.into())
    }

    /// Parse exactly one bracketed tree.
    ///
    /// Offsets in errors are byte offsets into `text`.
    pub fn parse(text: &str) -> DomainResult<Self> {
        let mut stack: Vec<(String, Vec<Tree>)> = Vec::new();
        let mut complete: Option<Tree> = None;

        for caps in token_regex().captures_iter(text) {
            let Some(token) = caps.get(0) else { continue };
            let offset = token.start();

            if token.as_str().starts_with('(') {
                if complete.is_some() {
                    return Err(malformed("expected end of input", offset));
                }
                let label = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                stack.push((label.to_string(), Vec::new()));
            } else if token.as_str() == ")" {
                let (label, children) = stack
                    .pop()
                    .ok_or_else(|| malformed("unexpected ')'", offset))?;
                let node = Tree::Node { label, children };
                match stack.last_mut() {
                    Some((_, siblings)) => siblings.push(node),
                    None => complete = Some(node),
                }
            } else {
                let (_, siblings) = stack
                    .last_mut()
                    .ok_or_else(|| malformed("expected '(' before leaf", offset))?;
                siblings.push(Tree::Leaf(token.as_str().to_string()));
            }
        }

        if !stack.is_empty() {
            return Err(malformed(
                format!("expected ')' ({} bracket(s) left open)", stack.len()),
                text.len(),
            ));
        }
        complete.ok_or_else(|| malformed("expected '('", text.len()))
    }

    /// Parse with non-structural literals protected by `escapes`.
    ///
    /// The returned tree holds the original literal text. Text that already
    /// contains a placeholder character is rejected since it cannot round-trip.
    pub fn parse_escaped(text: &str, escapes: &EscapeTable) -> DomainResult<Self> {
        if let Some(offset) = escapes.find_placeholder(text) {
            return Err(malformed("reserved private-use character", offset));
        }
        let tree = Tree::parse(&escapes.escape(text))?;
        Ok(tree.map_text(&|s: &str| escapes.unescape(s)))
    }

    /// Copy of the tree with `f` applied to every label and leaf.
    pub fn map_text(&self, f: &dyn Fn(&str) -> String) -> Tree {
        match self {
            Tree::Leaf(text) => Tree::Leaf(f(text)),
            Tree::Node { label, children } => Tree::Node {
                label: f(label),
                children: children.iter().map(|c| c.map_text(f)).collect(),
            },
        }
    }

    /// Label of a node, or the token of a leaf.
    pub fn text(&self) -> &str {
        match self {
            Tree::Leaf(text) => text,
            Tree::Node { label, .. } => label,
        }
    }

    pub fn children(&self) -> &[Tree] {
        match self {
            Tree::Leaf(_) => &[],
            Tree::Node { children, .. } => children,
        }
    }

    /// Longest root-to-leaf path, counting both ends.
    ///
    /// A leaf has height 1, so `(NN word)` has height 2.
    pub fn height(&self) -> usize {
        match self {
            Tree::Leaf(_) => 1,
            Tree::Node { children, .. } => {
                1 + children.iter().map(Tree::height).max().unwrap_or(0)
            }
        }
    }

    /// Positions of all leaves, left to right.
    pub fn leaf_positions(&self) -> Vec<TreePosition> {
        fn walk(tree: &Tree, path: &mut TreePosition, out: &mut Vec<TreePosition>) {
            match tree {
                Tree::Leaf(_) => out.push(path.clone()),
                Tree::Node { children, .. } => {
                    for (i, child) in children.iter().enumerate() {
                        path.push(i);
                        walk(child, path, out);
                        path.pop();
                    }
                }
            }
        }

        let mut out = Vec::new();
        walk(self, &mut Vec::new(), &mut out);
        out
    }

    /// Leaf tokens, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        match self {
            Tree::Leaf(text) => vec![text.as_str()],
            Tree::Node { children, .. } => children.iter().flat_map(Tree::leaves).collect(),
        }
    }

    /// Subtree at `position`, if it exists.
    pub fn get(&self, position: &[usize]) -> Option<&Tree> {
        position
            .iter()
            .try_fold(self, |tree, &i| tree.children().get(i))
    }

    /// First and last leaf positions. Equal when the tree has one leaf.
    pub fn anchor_positions(&self) -> DomainResult<(TreePosition, TreePosition)> {
        let mut positions = self.leaf_positions();
        let last = positions.pop().ok_or(DomainError::NoLeaves)?;
        let first = if positions.is_empty() {
            last.clone()
        } else {
            positions.swap_remove(0)
        };
        Ok((first, last))
    }

    /// Indented display tree for terminal output.
    pub fn to_termtree(&self) -> termtree::Tree<String> {
        match self {
            Tree::Leaf(text) => termtree::Tree::new(text.clone()),
            Tree::Node { label, children } => {
                let root = if label.is_empty() {
                    "∅".to_string()
                } else {
                    label.clone()
                };
                termtree::Tree::new(root)
                    .with_leaves(children.iter().map(Tree::to_termtree))
            }
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Leaf(text) => write!(f, "{}", text),
            Tree::Node { label, children } => {
                write!(f, "({}", label)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
