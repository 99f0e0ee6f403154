use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),

    #[error("Version component out of range in {0}")]
    OutOfRange(String),
}
