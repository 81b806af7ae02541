use thiserror::Error;

/// A field value that breaks one of its schema rules.
///
/// The `Display` output is the message shown next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{message}")]
    Required { field: String, message: String },
    #[error("{message}")]
    TooShort { field: String, min: usize, message: String },
    #[error("{message}")]
    TooLong { field: String, max: usize, message: String },
    #[error("{message}")]
    NotAllowed { field: String, message: String },
}

/// Failure of the outbound order request.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("could not reach the order service: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("order service responded with status {status}")]
    Status { status: u16 },
    #[error("order service sent an unreadable response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("order submission was interrupted: {0}")]
    Dispatch(String),
}

pub type ValidationResult = Result<(), ValidationError>;
