//! Rendering every named layout of a keyboard.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, warn};

use super::key::KeyDescriptor;
use super::render::render_layout;
use super::LayoutError;

/// The part of a keyboard's info document that describes its layouts:
/// `{ "layouts": { "<name>": { "layout": [ ...keys ] } } }`.
///
/// Other top-level fields of the document are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KeyboardInfo {
    #[serde(default)]
    pub layouts: BTreeMap<String, Layout>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Layout {
    pub layout: Vec<KeyDescriptor>,
}

/// Output of [`render_layouts`]: every layout either rendered or failed.
#[derive(Debug, Default)]
pub struct RenderedLayouts {
    pub rendered: BTreeMap<String, String>,
    pub failures: BTreeMap<String, LayoutError>,
}

impl RenderedLayouts {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the rendered layouts, or the first failure by layout name.
    pub fn into_result(self) -> Result<BTreeMap<String, String>, LayoutError> {
        match self.failures.into_iter().next() {
            Some((_, err)) => Err(err),
            None => Ok(self.rendered),
        }
    }
}

impl KeyboardInfo {
    /// Parses an info document from JSON.
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn layout(&self, name: &str) -> Option<&[KeyDescriptor]> {
        self.layouts.get(name).map(|l| l.layout.as_slice())
    }

    /// Renders the layout `name`, taking key labels from `labels` in key order.
    pub fn render_with_labels<S: AsRef<str>>(
        &self,
        name: &str,
        labels: &[S],
    ) -> Result<String, LayoutError> {
        let keys = self
            .layout(name)
            .ok_or_else(|| LayoutError::UnknownLayout(name.to_string()))?;
        render_layout(keys, Some(labels))
    }
}

/// Renders every layout in `info`, each on its own canvas.
///
/// A layout that fails to render is recorded in
/// [`failures`](RenderedLayouts::failures) and does not stop the others.
pub fn render_layouts(info: &KeyboardInfo) -> RenderedLayouts {
    let mut out = RenderedLayouts::default();

    for (name, layout) in &info.layouts {
        match render_layout::<&str>(&layout.layout, None) {
            Ok(text) => {
                debug!(layout = %name, keys = layout.layout.len(), "rendered layout");
                out.rendered.insert(name.clone(), text);
            }
            Err(err) => {
                warn!(layout = %name, error = %err, "failed to render layout");
                out.failures.insert(name.clone(), err);
            }
        }
    }

    out
}
