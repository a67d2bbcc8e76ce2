//! Error conversion helpers for I/O operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// let line = line.with_path_context("read line", path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_path_context_names_action_and_path() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::InvalidData, "bad utf-8"));
        let err = result
            .with_path_context("read line", Path::new("bank.txt"))
            .unwrap_err();
        assert_eq!(err.to_string(), "operation failed: read line: bank.txt");
    }
}
