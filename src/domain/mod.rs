//! Domain layer: input records, escaping and the parsed tree
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod escape;
pub mod record;
pub mod tree;

pub use error::{DomainError, DomainResult};
pub use escape::{EscapeTable, PARSE_ESCAPES};
pub use record::{Record, RECORD_DELIMITER};
pub use tree::{Tree, TreePosition};
