use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LayoutError {
    #[error("key {index} at ({x}, {y}) size {w}x{h} does not fit on the canvas")]
    KeyOutOfBounds {
        index: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },

    #[error("key {index} is too narrow to draw (width {w})")]
    KeyTooNarrow { index: usize, w: f64 },

    #[error("key {index} has no height (height {h})")]
    KeyTooShort { index: usize, h: f64 },

    #[error("unknown layout: {0}")]
    UnknownLayout(String),

    #[error("failed to parse keyboard info: {0}")]
    InvalidInfo(#[from] serde_json::Error),
}
