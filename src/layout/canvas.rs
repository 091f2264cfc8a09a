//! Fixed-size character grid that keys are drawn onto before serialization.

use crate::constants::canvas::{COLUMNS, ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Canvas {
    rows: Vec<Vec<char>>,
}

impl Canvas {
    /// A blank canvas of [`ROWS`] x [`COLUMNS`] spaces.
    pub fn new() -> Self {
        Self {
            rows: vec![vec![' '; COLUMNS]; ROWS],
        }
    }

    /// Overwrites `cells.len()` cells of row `y`, starting at column `x`.
    ///
    /// Callers keep the span inside the canvas; `CanvasRect` guarantees that
    /// for every key.
    pub fn put(&mut self, x: usize, y: usize, cells: &[char]) {
        self.rows[y][x..x + cells.len()].copy_from_slice(cells);
    }

    /// Serializes the canvas: blank rows are dropped, trailing whitespace is
    /// stripped from the rest, and rows are joined with `\n`.
    pub fn to_text(&self) -> String {
        let lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.iter().collect::<String>())
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim_end().to_string())
            .collect();
        lines.join("\n")
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}
