// Error types for Wake Console

use thiserror::Error;

use crate::types::ErrorCause;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Remote service returned HTTP {0}")]
    HttpStatus(u16),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Action failed with HTTP {status}: {message}")]
    Action { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Collapse the error into the cause surfaced by the connection state.
    ///
    /// Anything that never reached the remote service (or reached it but
    /// got no usable answer back) is a transport failure; an answer we got
    /// but could not accept is a protocol failure.
    pub fn cause(&self) -> ErrorCause {
        match self {
            Error::Transport(_) | Error::Io(_) => ErrorCause::Transport,
            Error::HttpStatus(_)
            | Error::MalformedResponse(_)
            | Error::InvalidCommand(_)
            | Error::Action { .. }
            | Error::Config(_)
            | Error::Toml(_) => ErrorCause::Protocol,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::MalformedResponse(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
