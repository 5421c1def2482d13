//! Error types for Dirscope

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // Contract Errors
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    // Directory Errors
    #[error("Directory context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("Directory query failed: {0}")]
    ProtocolFailure(String),

    // Cardinality Errors
    #[error("Result set contains ({0}) instead of a single result")]
    MultipleResults(usize),

    #[error("Result set is empty, expected a single result")]
    NoResult,

    // Mapping Errors
    #[error("Attribute mapping error: {0}")]
    Mapping(String),

    // Configuration Errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Error::MethodNotAllowed(_) => "MethodNotAllowed",
            Error::ContextUnavailable(_) => "ContextUnavailable",
            Error::ProtocolFailure(_) => "ProtocolFailure",
            Error::MultipleResults(_) => "MultipleResults",
            Error::NoResult => "NoResult",
            Error::Mapping(_) => "MappingError",
            Error::Config(_) => "ConfigError",
            Error::Io(_) => "InternalError",
            Error::Other(_) => "InternalError",
        }
    }
}
