use serde::Deserialize;

use super::LayoutError;
use crate::constants::canvas;

/// One physical key: position and size in key-grid units, plus an optional label.
///
/// Unknown fields (matrix positions and the like) are ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyDescriptor {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "unit")]
    pub w: f64,
    #[serde(default = "unit")]
    pub h: f64,
    #[serde(default)]
    pub label: Option<String>,
}

fn unit() -> f64 {
    1.0
}

impl Default for KeyDescriptor {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 1.0,
            h: 1.0,
            label: None,
        }
    }
}

impl KeyDescriptor {
    /// A 1x1 key at `(x, y)` with no label.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_size(mut self, w: f64, h: f64) -> Self {
        self.w = w;
        self.h = h;
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A key's footprint on the canvas, in columns and rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CanvasRect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl CanvasRect {
    /// Scales `key` onto the canvas, rounding every coordinate up.
    ///
    /// Fails if the key would be drawn outside the canvas, or is too small to
    /// hold its borders. `index` is the key's position in the layout.
    pub fn from_key(index: usize, key: &KeyDescriptor) -> Result<Self, LayoutError> {
        let out_of_bounds = || LayoutError::KeyOutOfBounds {
            index,
            x: key.x,
            y: key.y,
            w: key.w,
            h: key.h,
        };

        let coords = [key.x, key.y, key.w, key.h];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(out_of_bounds());
        }
        if key.h <= 0.0 {
            return Err(LayoutError::KeyTooShort { index, h: key.h });
        }

        // Slightly negative positions round up to column or row zero.
        let left = (key.x * canvas::KEY_UNIT_COLUMNS).ceil();
        let top = (key.y * canvas::KEY_UNIT_ROWS).ceil();
        if left < 0.0 || top < 0.0 {
            return Err(out_of_bounds());
        }

        let x = scale(key.x, canvas::KEY_UNIT_COLUMNS);
        let y = scale(key.y, canvas::KEY_UNIT_ROWS);
        let w = scale(key.w, canvas::KEY_UNIT_COLUMNS);
        let h = scale(key.h, canvas::KEY_UNIT_ROWS);

        if w < 2 {
            return Err(LayoutError::KeyTooNarrow { index, w: key.w });
        }

        // The label row sits at y + 1 even when the key is a single row tall.
        let bottom = y.saturating_add(h.max(2));
        if x.saturating_add(w) > canvas::COLUMNS || bottom > canvas::ROWS {
            return Err(out_of_bounds());
        }

        Ok(Self { x, y, w, h })
    }
}

fn scale(value: f64, unit: f64) -> usize {
    let scaled = (value * unit).ceil();
    if scaled >= usize::MAX as f64 {
        usize::MAX
    } else {
        scaled as usize
    }
}
