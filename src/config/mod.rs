//! Keyboard configuration resolved along a directory hierarchy.

mod builder;
mod chain;
mod error;
mod file;
mod fragment;
mod header;
mod make;

pub use builder::{KeyboardTree, KeyboardTreeBuilder};
pub use chain::ResolvedConfig;
pub use error::{ConfigError, FragmentError};
pub use fragment::{coerce_value, merge_overwrite, FragmentParser, TomlParser};
pub use header::ConfigHeaderParser;
pub use make::RulesMkParser;
