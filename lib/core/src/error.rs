use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A submission field could not be decoded. Fatal to the request.
    #[error("Invalid input format: {0}")]
    InvalidInputFormat(String),

    /// A stored reference case field could not be decoded. Recovered by
    /// substituting a default for that field.
    #[error("Case '{case}' has malformed field '{field}': {reason}")]
    CaseParseError {
        case: String,
        field: &'static str,
        reason: String,
    },

    #[error("Invalid weights: {0}")]
    WeightValidationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
