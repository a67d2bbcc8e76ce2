//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(_) | ApplicationError::LineNotFound { .. } => {
                        crate::exitcode::DATAERR
                    }
                    ApplicationError::InputUnreadable { .. } => crate::exitcode::NOINPUT,
                    ApplicationError::OutputUnwritable { .. } => crate::exitcode::CANTCREAT,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use rstest::rstest;
    use std::path::PathBuf;

    fn io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::Other, "boom")
    }

    #[rstest]
    #[case(CliError::Usage("x".into()), crate::exitcode::USAGE)]
    #[case(
        ApplicationError::LineNotFound { path: PathBuf::from("a"), index: 9, line_count: 2 }.into(),
        crate::exitcode::DATAERR
    )]
    #[case(ApplicationError::Domain(DomainError::NoLeaves).into(), crate::exitcode::DATAERR)]
    #[case(
        ApplicationError::InputUnreadable { path: PathBuf::from("a"), source: io_err() }.into(),
        crate::exitcode::NOINPUT
    )]
    #[case(
        ApplicationError::OutputUnwritable { path: PathBuf::from("a"), source: io_err() }.into(),
        crate::exitcode::CANTCREAT
    )]
    #[case(ApplicationError::Config { message: "x".into() }.into(), crate::exitcode::CONFIG)]
    #[case(CliError::Infra(InfraError::io("cwd", io_err())), crate::exitcode::IOERR)]
    fn test_exit_codes(#[case] err: CliError, #[case] expected: i32) {
        assert_eq!(err.exit_code(), expected);
    }
}
