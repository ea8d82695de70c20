use std::path::PathBuf;

/// Errors raised while loading the reference dataset.
///
/// All of these are fatal at startup: the server must not answer screening
/// requests without a fully loaded table.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset file {path}: {source}", path = path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset file has no header row")]
    MissingHeader,
    #[error("dataset is missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("dataset has no data rows")]
    Empty,
    #[error("dataset row at line {line}: expected {expected} fields, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("dataset row at line {line}, column {column}: invalid numeric value {value:?}")]
    NonNumericCell {
        line: usize,
        column: &'static str,
        value: String,
    },
}

/// Errors raised for a single malformed screening query.
///
/// Recoverable per request: the table and process state stay untouched.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("query has {actual} features but the reference table has {expected} columns")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Errors raised by the user credential store.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("username, email and password are required")]
    MissingField,
    #[error("account already exists")]
    AccountExists,
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("failed to create user data directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write user file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize user: {0}")]
    Serialization(serde_json::Error),
}
