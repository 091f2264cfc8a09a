pub mod config;
pub mod constants;
pub mod layout;
mod error;

pub use config::{ConfigError, KeyboardTree, ResolvedConfig};
pub use error::Error;
pub use layout::{render_layout, render_layouts, KeyDescriptor, KeyboardInfo, LayoutError};
