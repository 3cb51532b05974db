//! Error types shared by the builder, the region resolver and the
//! connection facade.

use thiserror::Error;

/// Invalid builder or region input, reported at the call that introduced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Configuration error: {message}")]
pub struct ConfigurationError {
    pub message: String,
}

impl ConfigurationError {
    pub fn new(message: impl Into<String>) -> Self {
        ConfigurationError {
            message: message.into(),
        }
    }
}

/// Malformed fully-qualified member name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at position {position} in '{input}': {message}")]
pub struct ParseError {
    /// The name as supplied
    pub input: String,
    /// Byte offset of the first offending character
    pub position: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(input: impl Into<String>, position: usize, message: impl Into<String>) -> Self {
        ParseError {
            input: input.into(),
            position,
            message: message.into(),
        }
    }
}

/// Failure while resolving coordinates into a region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Failure of a connection-level call.
///
/// Engine errors are carried as returned by the engine, without translation.
#[derive(Debug, Error)]
pub enum Error<E: std::error::Error + 'static> {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Engine error: {0}")]
    Engine(#[source] E),
}

impl<E: std::error::Error + 'static> From<RegionError> for Error<E> {
    fn from(e: RegionError) -> Self {
        match e {
            RegionError::Configuration(e) => Error::Configuration(e),
            RegionError::Parse(e) => Error::Parse(e),
        }
    }
}

impl<E: std::error::Error + 'static> Error<E> {
    /// The engine error, if the failure came from the engine.
    pub fn engine(&self) -> Option<&E> {
        match self {
            Error::Engine(e) => Some(e),
            _ => None,
        }
    }
}
