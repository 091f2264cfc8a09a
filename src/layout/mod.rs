//! Box-drawing diagrams of physical keyboard layouts.

mod canvas;
mod error;
mod key;
mod render;
mod set;

pub use error::LayoutError;
pub use key::KeyDescriptor;
pub use render::render_layout;
pub use set::{render_layouts, KeyboardInfo, Layout, RenderedLayouts};
