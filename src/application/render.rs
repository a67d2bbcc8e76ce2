//! TikZ rendering of a parsed tree and its alignment tokens
//!
//! The diagram is a tikz-qtree `\Tree` laid out the way the classic bracketed
//! pretty-printer does it: a subtree stays on one line while it fits into the
//! margin, otherwise each child goes on its own line, indented two more spaces.
//!
//! The first and last leaves are emitted as named nodes (`n0`, `n1`) with an
//! explicit `\edge;` so the token and index rows can be aligned under them.
//! The tree itself is never modified; decoration happens while rendering.

use itertools::Itertools;

use crate::config::LayoutConfig;
use crate::domain::{DomainResult, Record, Tree, TreePosition};

const PREAMBLE: &str = r"\documentclass[tikz]{standalone}
\usepackage{CJKutf8}
\usepackage{color}
\usepackage{tikz}
\usepackage{tikz-qtree}
\usetikzlibrary{calc}
\thispagestyle{empty}
\begin{document}
";

const CLOSING: &str = r"
\end{scope}
\end{tikzpicture}
\end{CJK}
\end{document}
";

/// Escape text for use inside a TikZ node.
///
/// `$` becomes `\$` and `|||` is typeset in math mode as `$|||$`.
/// Underscores are typeset as spaces. Square brackets become `\lbrack{}` and
/// `\rbrack{}` so tikz-qtree never mistakes a token for tree structure.
pub fn tex_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '$' => escaped.push_str(r"\$"),
            '%' => escaped.push_str(r"\%"),
            '#' => escaped.push_str(r"\#"),
            '&' => escaped.push_str(r"\&"),
            '{' => escaped.push_str(r"\{"),
            '}' => escaped.push_str(r"\}"),
            '_' => escaped.push_str(r"\ "),
            '[' => escaped.push_str(r"\lbrack{}"),
            ']' => escaped.push_str(r"\rbrack{}"),
            '^' => escaped.push_str(r"\^{}"),
            '~' => escaped.push_str(r"\~{}"),
            '\\' => escaped.push_str(r"\textbackslash{}"),
            c => escaped.push(c),
        }
    }
    escaped.replace("|||", "$|||$")
}

/// Named node identifiers of the two anchor leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchors {
    pub first: String,
    pub last: String,
}

/// Rendered `\Tree` text plus the node names of its anchor leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub text: String,
    pub anchors: Anchors,
}

struct QtreeWriter<'a> {
    layout: &'a LayoutConfig,
    /// Anchor positions with their node names, in emission order
    named: Vec<(TreePosition, String)>,
}

impl QtreeWriter<'_> {
    fn leaf(&self, text: &str, position: &[usize]) -> String {
        match self.named.iter().find(|(p, _)| p.as_slice() == position) {
            Some((_, name)) => format!(r"\edge; \node({}) {{{}}};", name, tex_escape(text)),
            None => tex_escape(text),
        }
    }

    fn flat(&self, tree: &Tree, position: &mut TreePosition) -> String {
        match tree {
            Tree::Leaf(text) => self.leaf(text, position),
            Tree::Node { label, children } => {
                let body = children
                    .iter()
                    .enumerate()
                    .map(|(i, child)| {
                        position.push(i);
                        let s = self.flat(child, position);
                        position.pop();
                        s
                    })
                    .join(" ");
                format!("[.{} {} ]", tex_escape(label), body)
            }
        }
    }

    fn pretty(&self, tree: &Tree, position: &mut TreePosition, indent: usize) -> String {
        let flat = self.flat(tree, position);
        if flat.chars().count() + indent < self.layout.margin {
            return flat;
        }

        match tree {
            Tree::Leaf(text) => self.leaf(text, position),
            Tree::Node { label, children } => {
                let mut s = format!("[.{}", tex_escape(label));
                let pad = " ".repeat(indent + 2);
                for (i, child) in children.iter().enumerate() {
                    position.push(i);
                    let rendered = match child {
                        Tree::Node { .. } => self.pretty(child, position, indent + 2),
                        Tree::Leaf(text) => self.leaf(text, position),
                    };
                    position.pop();
                    s.push('\n');
                    s.push_str(&pad);
                    s.push_str(&rendered);
                }
                s.push_str(" ]");
                s
            }
        }
    }
}

/// Render the `\Tree` diagram with the first and last leaf as named nodes.
pub fn render_diagram(tree: &Tree, layout: &LayoutConfig) -> DomainResult<Diagram> {
    let (first, last) = tree.anchor_positions()?;

    let anchors = if first == last {
        Anchors {
            first: "n0".to_string(),
            last: "n0".to_string(),
        }
    } else {
        Anchors {
            first: "n0".to_string(),
            last: "n1".to_string(),
        }
    };

    let mut named = vec![(first, anchors.first.clone())];
    if anchors.last != anchors.first {
        named.push((last, anchors.last.clone()));
    }

    let writer = QtreeWriter { layout, named };
    let body = writer.pretty(tree, &mut Vec::new(), layout.indent);

    Ok(Diagram {
        text: format!(r"\Tree {}", body),
        anchors,
    })
}

/// Vertical offsets (pt) of the token and index rows below a tree of `height`.
pub fn row_offsets(height: usize, layout: &LayoutConfig) -> (i64, i64) {
    let base = -(height as i64) * layout.level_height;
    (base - layout.token_gap, base - layout.index_gap)
}

/// Render the complete standalone document for one record.
pub fn render_document(
    tree: &Tree,
    record: &Record,
    layout: &LayoutConfig,
    cjk_font: &str,
) -> DomainResult<String> {
    let diagram = render_diagram(tree, layout)?;
    let (token_y, index_y) = row_offsets(tree.height(), layout);
    let Anchors { first, last } = &diagram.anchors;

    let tokens = &record.tokens;
    let first_token = tokens.first().map(String::as_str).unwrap_or_default();
    let last_token = tokens.last().map(String::as_str).unwrap_or_default();

    let mut doc = String::from(PREAMBLE);
    doc.push_str(&format!("\\begin{{CJK}}{{UTF8}}{{{}}}\n", cjk_font));
    doc.push_str("\n\\begin{tikzpicture}\n");
    doc.push_str("\\begin{scope}\n");
    doc.push_str(&diagram.text);
    doc.push('\n');

    doc.push_str(&format!(
        "\\draw ({} |- 0,{}pt) node (s0) {{{}}};\n",
        first,
        token_y,
        tex_escape(first_token)
    ));
    doc.push_str(&format!(
        "\\draw ({} |- 0,{}pt) node (s1) {{{}}};\n",
        last,
        token_y,
        tex_escape(last_token)
    ));
    doc.push_str(&format!("\\draw ({} |- 0,{}pt) node (p0) {{0}};\n", first, index_y));
    doc.push_str(&format!(
        "\\draw ({} |- 0,{}pt) node (p1) {{{}}};\n",
        last,
        index_y,
        record.last_index()
    ));

    // Nothing to interpolate between fewer than two tokens.
    if tokens.len() >= 2 {
        let span = (tokens.len() - 1) as f64;
        for (i, token) in tokens.iter().enumerate().take(tokens.len() - 1).skip(1) {
            let fraction = i as f64 / span;
            doc.push_str(&format!(
                "\\node () at ($(s0)!{}!(s1)$) {{{}}};\n",
                fraction,
                tex_escape(token)
            ));
            doc.push_str(&format!(
                "\\node () at ($(p0)!{}!(p1)$) {{{}}};\n",
                fraction, i
            ));
        }
    }

    doc.push_str(CLOSING);
    Ok(doc)
}
