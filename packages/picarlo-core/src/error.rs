use thiserror::Error;

#[derive(Error, Debug)]
pub enum PiError {
    #[error("Invalid point count: {0}")]
    InvalidInput(String),

    #[error("Point source request failed: {0}")]
    Transport(String),

    #[error("Point source returned status {0}")]
    HttpStatus(u16),

    #[error("Malformed point stream: {0}")]
    MalformedStream(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("A render session is already running")]
    AlreadyRunning,
}

pub type Result<T> = std::result::Result<T, PiError>;
