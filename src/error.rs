//! Error types for tocmd operations.

use thiserror::Error;

use crate::parser::ExtractError;

/// Errors surfaced by the library outside the pure extract/render path.
#[derive(Error, Debug)]
pub enum Error {
    #[error("outline extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid panel message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("file watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("could not determine config directory")]
    MissingConfigDir,

    #[error("default expand level {0} is outside 1-5")]
    InvalidExpandLevel(i64),
}

pub type Result<T> = std::result::Result<T, Error>;
