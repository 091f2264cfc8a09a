use crate::config::ConfigError;
use crate::layout::LayoutError;
use thiserror::Error;

/// Top-level error type for the keyboard-layout library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}
