use thiserror::Error;

pub mod backend;
pub mod geocode;
pub mod notify;

/// Failure of a remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Request failed: {0}")]
    Fetch(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    Response(String),
}

pub type Result<T> = std::result::Result<T, Error>;
