//! Error taxonomy shared by every layer of the library. Each variant maps to a
//! condition the front-end can report and recover from; nothing here is meant
//! to terminate the process.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used by the library surface.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A field was missing or malformed. The caller should re-prompt.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User '{0}' already exists.")]
    DuplicateUser(String),

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Invalid date '{0}', expected YYYY-MM-DD.")]
    InvalidDateFormat(String),

    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("failed to prepare data directory {}: {source}", path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The export target could not be written. The report itself is untouched
    /// so the caller may retry.
    #[error("Could not export to {}: {reason}", path.display())]
    ExportIo { path: PathBuf, reason: String },

    #[error("Generate a report first.")]
    NoReport,
}

/// Field-level validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required.")]
    MissingField(&'static str),

    #[error("{field} must be a number, got '{value}'.")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unknown payment method '{0}'.")]
    UnknownPaymentMethod(String),
}

impl Error {
    /// Whether the user can fix the problem by editing their input.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::Validation(_)
                | Error::DuplicateUser(_)
                | Error::InvalidCredentials
                | Error::InvalidDateFormat(_)
                | Error::NoReport
        )
    }

    pub(crate) fn export(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::ExportIo {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
