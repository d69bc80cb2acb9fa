use thiserror::Error;

/// Fatal application error carrying the process exit code it maps to.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

/// Errors raised by an earnings provider, either while it is being built or
/// while answering a lookup for a single symbol.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("calendar unavailable: {0}")]
    Calendar(String),

    #[error("request failed: {0}")]
    Http(String),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("invalid date '{0}'")]
    InvalidDate(String),
}
