//! Render one bracketed parse tree from a tree-bank file as a TikZ diagram.
//!
//! Layers, innermost first: `domain` (records, escaping, the tree),
//! `application` (rendering and the emitter service), `infrastructure`
//! (filesystem boundary, service container), `config` and `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
