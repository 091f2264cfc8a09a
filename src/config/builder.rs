use std::path::{Path, PathBuf};

use tracing::debug;

use super::chain::{redirect_target, resolve_chain, segments, ResolvedConfig};
use super::fragment::FragmentParser;
use super::header::ConfigHeaderParser;
use super::make::RulesMkParser;
use super::ConfigError;
use crate::constants::tree;

/// A directory tree of keyboard definitions.
///
/// Each keyboard is named by a `/`-separated path below the root, such as
/// `acme/pad/rev1`. Every directory along that path may hold a rules fragment
/// and a config fragment; resolving a keyboard merges them from the top of the
/// tree down, so deeper levels override shallower ones.
///
/// ## Example
///
/// ```no_run
/// use keyboard_layout::KeyboardTree;
///
/// let tree = KeyboardTree::builder().root("qmk/keyboards").build()?;
/// let rules = tree.rules("acme/pad/rev1")?;
/// let config = tree.config("acme/pad/rev1")?;
///
/// println!("MCU = {:?}", rules.get_str("MCU"));
/// println!("rows = {:?}", config.get("MATRIX_ROWS"));
/// # Ok::<(), keyboard_layout::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct KeyboardTree {
    root: PathBuf,
    rules_file: String,
    config_file: String,
    redirect_key: String,
    rules_parser: Box<dyn FragmentParser>,
    config_parser: Box<dyn FragmentParser>,
}

impl KeyboardTree {
    /// Creates a new builder with the default layout: a `keyboards` root,
    /// `rules.mk` and `config.h` fragments, and the `DEFAULT_FOLDER` redirect.
    pub fn builder() -> KeyboardTreeBuilder {
        KeyboardTreeBuilder::default()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true if `keyboard` names a directory holding a rules fragment.
    pub fn is_keyboard(&self, keyboard: &str) -> bool {
        if segments(keyboard).is_err() {
            return false;
        }
        let dir = self.root.join(keyboard);
        dir.is_dir() && dir.join(&self.rules_file).is_file()
    }

    /// Resolves the rules fragments along `keyboard`.
    ///
    /// The redirect setting is not followed here; a `DEFAULT_FOLDER` found in
    /// the fragments is returned as an ordinary setting.
    pub fn rules(&self, keyboard: &str) -> Result<ResolvedConfig, ConfigError> {
        resolve_chain(
            &self.root,
            keyboard,
            &self.rules_file,
            self.rules_parser.as_ref(),
            &self.redirect_key,
        )
    }

    /// Resolves the config fragments for `keyboard`.
    ///
    /// The rules are resolved first; if they carry a redirect setting, the
    /// config fragments are walked along the redirect target instead.
    pub fn config(&self, keyboard: &str) -> Result<ResolvedConfig, ConfigError> {
        let rules = self.rules(keyboard)?;
        let target = redirect_target(rules.as_table(), &self.redirect_key)?.unwrap_or(keyboard);
        if target != keyboard {
            debug!(keyboard, target, "config follows redirect");
        }

        resolve_chain(
            &self.root,
            target,
            &self.config_file,
            self.config_parser.as_ref(),
            &self.redirect_key,
        )
    }

    /// Resolves an arbitrary fragment file along `keyboard` with `parser`.
    pub fn resolve_with(
        &self,
        keyboard: &str,
        fragment: &str,
        parser: &dyn FragmentParser,
    ) -> Result<ResolvedConfig, ConfigError> {
        resolve_chain(&self.root, keyboard, fragment, parser, &self.redirect_key)
    }
}

/// Builder for a [`KeyboardTree`].
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct KeyboardTreeBuilder {
    root: PathBuf,
    rules_file: String,
    config_file: String,
    redirect_key: String,
    rules_parser: Box<dyn FragmentParser>,
    config_parser: Box<dyn FragmentParser>,
}

impl Default for KeyboardTreeBuilder {
    fn default() -> Self {
        Self {
            root: PathBuf::from(tree::DEFAULT_ROOT),
            rules_file: tree::RULES_FILE.to_string(),
            config_file: tree::CONFIG_FILE.to_string(),
            redirect_key: tree::REDIRECT_KEY.to_string(),
            rules_parser: Box::new(RulesMkParser),
            config_parser: Box::new(ConfigHeaderParser),
        }
    }
}

impl KeyboardTreeBuilder {
    /// Sets the directory that keyboard paths are resolved against.
    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    /// Sets the rules fragment file name and its parser.
    pub fn rules_file(
        mut self,
        name: impl Into<String>,
        parser: impl FragmentParser + 'static,
    ) -> Self {
        self.rules_file = name.into();
        self.rules_parser = Box::new(parser);
        self
    }

    /// Sets the config fragment file name and its parser.
    pub fn config_file(
        mut self,
        name: impl Into<String>,
        parser: impl FragmentParser + 'static,
    ) -> Self {
        self.config_file = name.into();
        self.config_parser = Box::new(parser);
        self
    }

    /// Sets the rules setting that redirects config resolution.
    pub fn redirect_key(mut self, key: impl Into<String>) -> Self {
        self.redirect_key = key.into();
        self
    }

    /// Builds the tree, failing if the root directory does not exist.
    pub fn build(self) -> Result<KeyboardTree, ConfigError> {
        if !self.root.is_dir() {
            return Err(ConfigError::RootNotFound(self.root));
        }

        Ok(KeyboardTree {
            root: self.root,
            rules_file: self.rules_file,
            config_file: self.config_file,
            redirect_key: self.redirect_key,
            rules_parser: self.rules_parser,
            config_parser: self.config_parser,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TomlParser;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn tree(dir: &TempDir) -> KeyboardTree {
        KeyboardTree::builder().root(dir.path()).build().unwrap()
    }

    #[test]
    fn test_missing_root() {
        let result = KeyboardTree::builder()
            .root("/nonexistent/keyboards")
            .build();
        assert!(matches!(result, Err(ConfigError::RootNotFound(_))));
    }

    #[test]
    fn test_rules_merge_most_specific_wins() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "acme/rules.mk", "MCU = atmega32u4\nBOOTLOADER = caterina\n");
        write(dir.path(), "acme/pad/rules.mk", "BOOTLOADER = atmel-dfu\n");
        write(dir.path(), "acme/pad/rev1/rules.mk", "RGBLIGHT_ENABLE = yes\n");

        let rules = tree(&dir).rules("acme/pad/rev1").unwrap();

        assert_eq!(rules.get_str("MCU"), Some("atmega32u4"));
        assert_eq!(rules.get_str("BOOTLOADER"), Some("atmel-dfu"));
        assert_eq!(rules.get_str("RGBLIGHT_ENABLE"), Some("yes"));
        assert_eq!(rules.len(), 3);
    }

    #[test]
    fn test_config_merges_headers() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "acme/rules.mk", "MCU = rp2040\n");
        write(dir.path(), "acme/config.h", "#define MATRIX_ROWS 4\n#define DEBOUNCE 5\n");
        write(dir.path(), "acme/rev1/config.h", "#define DEBOUNCE 10\n");

        let config = tree(&dir).config("acme/rev1").unwrap();

        assert_eq!(config.get("MATRIX_ROWS").and_then(|v| v.as_integer()), Some(4));
        assert_eq!(config.get("DEBOUNCE").and_then(|v| v.as_integer()), Some(10));
    }

    #[test]
    fn test_config_follows_default_folder() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "acme/rules.mk", "DEFAULT_FOLDER = acme/rev2\n");
        write(dir.path(), "acme/config.h", "#define MATRIX_ROWS 4\n");
        write(dir.path(), "acme/rev2/config.h", "#define MATRIX_COLS 12\n");

        let keyboards = tree(&dir);
        let config = keyboards.config("acme").unwrap();
        assert_eq!(config.get("MATRIX_ROWS").and_then(|v| v.as_integer()), Some(4));
        assert_eq!(config.get("MATRIX_COLS").and_then(|v| v.as_integer()), Some(12));

        let rules = keyboards.rules("acme").unwrap();
        assert_eq!(rules.get_str("DEFAULT_FOLDER"), Some("acme/rev2"));
    }

    #[test]
    fn test_non_string_redirect_is_rejected() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "acme/info.toml", "DEFAULT_FOLDER = 3\n");

        let keyboards = KeyboardTree::builder()
            .root(dir.path())
            .rules_file("info.toml", TomlParser)
            .build()
            .unwrap();

        let err = keyboards.config("acme").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRedirect { .. }));
    }

    #[test]
    fn test_custom_fragments() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "acme/keyboard.toml", "redirect = \"acme/v2\"\n");
        write(dir.path(), "acme/v2/settings.toml", "rows = 6\n");

        let keyboards = KeyboardTree::builder()
            .root(dir.path())
            .rules_file("keyboard.toml", TomlParser)
            .config_file("settings.toml", TomlParser)
            .redirect_key("redirect")
            .build()
            .unwrap();

        let config = keyboards.config("acme").unwrap();
        assert_eq!(config.get("rows").and_then(|v| v.as_integer()), Some(6));
    }

    #[test]
    fn test_resolve_with_parser() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "acme/info.toml", "name = \"Acme\"\n");
        write(dir.path(), "acme/pad/info.toml", "name = \"Acme Pad\"\n");

        let info = tree(&dir)
            .resolve_with("acme/pad", "info.toml", &TomlParser)
            .unwrap();
        assert_eq!(info.get_str("name"), Some("Acme Pad"));
    }

    #[test]
    fn test_is_keyboard() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "acme/rules.mk", "MCU = rp2040\n");
        fs::create_dir_all(dir.path().join("bare")).unwrap();

        let keyboards = tree(&dir);
        assert!(keyboards.is_keyboard("acme"));
        assert!(!keyboards.is_keyboard("bare"));
        assert!(!keyboards.is_keyboard("missing"));
        assert!(!keyboards.is_keyboard("../acme"));
        assert!(keyboards.is_keyboard("acme/"));
    }
}
