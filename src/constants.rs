//! Fixed sizes shared by the layout renderer and the keyboard tree.

/// Canvas geometry used by the layout renderer.
pub mod canvas {
    /// Width of the drawing surface in characters.
    pub const COLUMNS: usize = 200;

    /// Height of the drawing surface in rows.
    pub const ROWS: usize = 50;

    /// Canvas columns per key-grid unit.
    pub const KEY_UNIT_COLUMNS: f64 = 4.0;

    /// Canvas rows per key-grid unit.
    pub const KEY_UNIT_ROWS: f64 = 3.0;
}

/// Key label conventions.
pub mod label {
    /// Keycode prefix stripped from override labels (`KC_A` -> `A`).
    pub const KEYCODE_PREFIX: &str = "KC_";
}

/// Keyboard tree defaults.
pub mod tree {
    /// Directory holding every keyboard definition.
    pub const DEFAULT_ROOT: &str = "keyboards";

    /// Build rules fragment present at each level.
    pub const RULES_FILE: &str = "rules.mk";

    /// C header fragment present at each level.
    pub const CONFIG_FILE: &str = "config.h";

    /// Setting that redirects a keyboard to one of its sub-folders.
    pub const REDIRECT_KEY: &str = "DEFAULT_FOLDER";
}
