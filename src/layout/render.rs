//! Drawing a list of keys as box-drawing art.

use super::canvas::Canvas;
use super::key::{CanvasRect, KeyDescriptor};
use super::LayoutError;
use crate::constants::label::KEYCODE_PREFIX;

const TOP_LEFT: char = '┌';
const TOP_RIGHT: char = '┐';
const BOTTOM_LEFT: char = '└';
const BOTTOM_RIGHT: char = '┘';
const HORIZONTAL: char = '─';
const VERTICAL: char = '│';

/// Renders a single layout to text.
///
/// Keys are drawn in order onto a fresh canvas, later keys overwriting earlier
/// ones where they overlap. The nth entry of `overrides` replaces the label of
/// the nth key, with any `KC_` prefix removed; keys beyond the end of
/// `overrides` keep their own label. An empty `overrides` is the same as none.
///
/// Returns an error naming the first key that does not fit on the canvas.
///
/// ```
/// use keyboard_layout::{render_layout, KeyDescriptor};
///
/// let keys = [KeyDescriptor::at(0.0, 0.0), KeyDescriptor::at(1.0, 0.0)];
/// let text = render_layout(&keys, Some(&["KC_Q", "KC_W"][..]))?;
/// assert_eq!(text, "┌──┐┌──┐\n│Q ││W │\n└──┘└──┘");
/// # Ok::<(), keyboard_layout::LayoutError>(())
/// ```
pub fn render_layout<S: AsRef<str>>(
    keys: &[KeyDescriptor],
    overrides: Option<&[S]>,
) -> Result<String, LayoutError> {
    let overrides = overrides.unwrap_or_default();
    let mut canvas = Canvas::new();

    for (index, key) in keys.iter().enumerate() {
        let rect = CanvasRect::from_key(index, key)?;
        let label = match overrides.get(index) {
            Some(label) => strip_keycode_prefix(label.as_ref()),
            None => key.label.as_deref().unwrap_or_default(),
        };
        draw_key(&mut canvas, rect, label);
    }

    Ok(canvas.to_text())
}

fn strip_keycode_prefix(label: &str) -> &str {
    label.strip_prefix(KEYCODE_PREFIX).unwrap_or(label)
}

fn draw_key(canvas: &mut Canvas, rect: CanvasRect, label: &str) {
    let inner = rect.w - 2;

    let mut label_cells: Vec<char> = label.chars().take(inner).collect();
    label_cells.resize(inner, ' ');

    let top = framed(TOP_LEFT, &vec![HORIZONTAL; inner], TOP_RIGHT);
    let label_row = framed(VERTICAL, &label_cells, VERTICAL);
    let middle = framed(VERTICAL, &vec![' '; inner], VERTICAL);
    let bottom = framed(BOTTOM_LEFT, &vec![HORIZONTAL; inner], BOTTOM_RIGHT);

    canvas.put(rect.x, rect.y, &top);
    canvas.put(rect.x, rect.y + 1, &label_row);
    for row in 0..rect.h.saturating_sub(3) {
        canvas.put(rect.x, rect.y + row + 2, &middle);
    }
    canvas.put(rect.x, rect.y + rect.h - 1, &bottom);
}

fn framed(left: char, inner: &[char], right: char) -> Vec<char> {
    let mut row = Vec::with_capacity(inner.len() + 2);
    row.push(left);
    row.extend_from_slice(inner);
    row.push(right);
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_LABELS: Option<&[&str]> = None;

    fn render(keys: &[KeyDescriptor]) -> String {
        render_layout(keys, NO_LABELS).unwrap()
    }

    #[test]
    fn test_single_unit_key() {
        let text = render(&[KeyDescriptor::at(0.0, 0.0)]);
        assert_eq!(text, "┌──┐\n│  │\n└──┘");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.chars().count() == 4));
    }

    #[test]
    fn test_empty_layout() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_own_label_is_padded() {
        let keys = [KeyDescriptor::at(0.0, 0.0).with_size(2.0, 1.0).with_label("Esc")];
        assert_eq!(render(&keys), "┌──────┐\n│Esc   │\n└──────┘");
    }

    #[test]
    fn test_long_label_is_truncated() {
        let keys = [KeyDescriptor::at(0.0, 0.0).with_label("Backspace")];
        let text = render(&keys);
        assert_eq!(text.lines().nth(1), Some("│Ba│"));

        let keys = [KeyDescriptor::at(0.0, 0.0).with_size(1.5, 1.0).with_label("Enter")];
        assert_eq!(render(&keys).lines().nth(1), Some("│Ente│"));
    }

    #[test]
    fn test_override_labels_strip_keycode_prefix() {
        let keys = [KeyDescriptor::at(0.0, 0.0), KeyDescriptor::at(1.0, 0.0)];
        let text = render_layout(&keys, Some(&["KC_A", "A"][..])).unwrap();
        assert_eq!(text.lines().nth(1), Some("│A ││A │"));
    }

    #[test]
    fn test_own_labels_keep_prefix() {
        let keys = [KeyDescriptor::at(0.0, 0.0).with_size(2.0, 1.0).with_label("KC_A")];
        assert_eq!(render(&keys).lines().nth(1), Some("│KC_A  │"));
    }

    #[test]
    fn test_short_override_list_falls_back_to_own_labels() {
        let keys = [
            KeyDescriptor::at(0.0, 0.0).with_label("1"),
            KeyDescriptor::at(1.0, 0.0).with_label("2"),
            KeyDescriptor::at(2.0, 0.0).with_label("3"),
        ];
        let overrides = vec!["KC_X".to_string()];
        let text = render_layout(&keys, Some(overrides.as_slice())).unwrap();
        assert_eq!(text.lines().nth(1), Some("│X ││2 ││3 │"));
        assert_eq!(overrides, vec!["KC_X".to_string()]);
    }

    #[test]
    fn test_empty_override_list_uses_own_labels() {
        let keys = [KeyDescriptor::at(0.0, 0.0).with_label("Q")];
        let empty: [&str; 0] = [];
        assert_eq!(
            render_layout(&keys, Some(&empty[..])).unwrap(),
            render(&keys)
        );
    }

    #[test]
    fn test_tall_key_has_interior_rows() {
        let keys = [KeyDescriptor::at(0.0, 0.0).with_size(1.0, 2.0).with_label("+")];
        assert_eq!(
            render(&keys),
            "┌──┐\n│+ │\n│  │\n│  │\n│  │\n└──┘"
        );
    }

    #[test]
    fn test_offset_key_keeps_leading_space() {
        let keys = [KeyDescriptor::at(0.5, 1.0)];
        assert_eq!(render(&keys), "  ┌──┐\n  │  │\n  └──┘");
    }

    #[test]
    fn test_slightly_negative_key_draws_at_origin() {
        let keys = [KeyDescriptor::at(-0.1, -0.2)];
        assert_eq!(render(&keys), render(&[KeyDescriptor::at(0.0, 0.0)]));
    }

    #[test]
    fn test_later_key_wins_overlap() {
        let keys = [
            KeyDescriptor::at(0.0, 0.0).with_label("A"),
            KeyDescriptor::at(0.5, 0.0).with_label("B"),
        ];
        assert_eq!(render(&keys), "┌─┌──┐\n│A│B │\n└─└──┘");
    }

    #[test]
    fn test_short_key_rows_overwrite() {
        // Two canvas rows: the bottom border lands on the label row.
        let keys = [KeyDescriptor::at(0.0, 0.0).with_size(1.0, 0.5).with_label("x")];
        assert_eq!(render(&keys), "┌──┐\n└──┘");
    }

    #[test]
    fn test_out_of_bounds_key_is_reported() {
        let keys = [KeyDescriptor::at(0.0, 0.0), KeyDescriptor::at(60.0, 0.0)];
        let err = render_layout(&keys, NO_LABELS).unwrap_err();
        assert!(matches!(err, LayoutError::KeyOutOfBounds { index: 1, .. }));
    }

    #[test]
    fn test_render_is_deterministic() {
        let keys: Vec<KeyDescriptor> = (0..15)
            .map(|i| KeyDescriptor::at(f64::from(i), f64::from(i % 3)).with_label(format!("K{i}")))
            .collect();
        let first = render(&keys);
        assert_eq!(first, render(&keys));
        assert_eq!(first.lines().count(), 9);
    }
}
