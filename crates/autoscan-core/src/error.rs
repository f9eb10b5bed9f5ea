use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutoscanError {
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigValidationError),
    /// The remote service can never be used as configured; retrying will not help.
    #[error("fatal: {0}")]
    Fatal(String),
    #[error("target unavailable: {0}")]
    Unavailable(String),
    #[error("target error: {0}")]
    Remote(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("parse error: {0}")]
    Parse(String),
}

impl AutoscanError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, AutoscanError::Fatal(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, AutoscanError::Unavailable(_) | AutoscanError::Remote(_))
    }
}

pub type Result<T, E = AutoscanError> = std::result::Result<T, E>;
