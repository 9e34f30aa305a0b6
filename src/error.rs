use crate::parser::ParsingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    /// The request can not be served at all, e.g. the schema has no query root.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
    /// No value can be generated for a type. Collapses to Empty at nullable
    /// positions and aborts the enclosing value everywhere else.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    #[error("failed to draw a sample: {0}")]
    Sampling(String),
}
