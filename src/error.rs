//! Error types for the draksha-fov pipeline.

use thiserror::Error;

/// Pipeline error type.
///
/// Only structurally missing data is fatal. Geometric degeneracies
/// (zero-length rows, zero-length motion steps, parallel rays) are resolved
/// in place with documented fallback values and never reach this type.
#[derive(Error, Debug)]
pub enum DrakshaError {
    /// A row id in the survey table lacks its S or E endpoint.
    #[error("row {row} is missing its '{missing}' endpoint in the survey table")]
    MalformedRowData { row: i32, missing: char },

    /// A row id carries more than one S or more than one E record.
    #[error("row {row} has duplicate '{endpoint}' endpoints in the survey table")]
    DuplicateRowEndpoint { row: i32, endpoint: char },

    /// The image GPS log contains no samples.
    #[error("image GPS log contains no samples")]
    EmptyGpsLog,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for DrakshaError {
    fn from(e: toml::de::Error) -> Self {
        DrakshaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DrakshaError>;
