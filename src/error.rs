//! Error types for shell composition and route table construction.

use thiserror::Error;

/// Route table construction failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// A binding was declared with an empty pattern.
    #[error("route pattern must not be empty")]
    EmptyPattern,

    /// A binding pattern does not begin with `/`.
    #[error("route pattern `{0}` must begin with '/'")]
    NotRooted(String),
}

/// Top-level shell error.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The declared route table is invalid.
    #[error("invalid route table: {0}")]
    Route(#[from] RouteError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
