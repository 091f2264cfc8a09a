use std::path::PathBuf;
use thiserror::Error;

/// Error raised by a [`FragmentParser`](super::FragmentParser) on malformed content.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FragmentError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("keyboard root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("keyboard '{keyboard}' not found: no directory for segment '{segment}'")]
    KeyboardNotFound { keyboard: String, segment: String },

    #[error("invalid keyboard path '{0}'")]
    InvalidKeyboardPath(String),

    #[error("failed to read fragment '{path}' (segment '{segment}'): {source}")]
    ReadError {
        path: PathBuf,
        segment: String,
        source: std::io::Error,
    },

    #[error("failed to parse fragment '{path}' (segment '{segment}'): {source}")]
    ParseError {
        path: PathBuf,
        segment: String,
        source: FragmentError,
    },

    #[error("redirect setting '{key}' is not a string")]
    InvalidRedirect { key: String },

    #[error("failed to deserialize resolved config: {0}")]
    DeserializeError(#[from] toml::de::Error),
}
