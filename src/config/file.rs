//! Loading fragment files from disk.

use std::path::Path;

use toml::Table;

use super::fragment::FragmentParser;
use super::ConfigError;

/// Loads and parses a fragment file.
///
/// Returns `Ok(None)` if the file doesn't exist. `segment` names the level of
/// the keyboard path being walked and is carried into any error.
pub(crate) fn load_fragment(
    path: &Path,
    segment: &str,
    parser: &dyn FragmentParser,
) -> Result<Option<Table>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let table = parser
                .parse(&contents)
                .map_err(|e| ConfigError::ParseError {
                    path: path.to_path_buf(),
                    segment: segment.to_string(),
                    source: e,
                })?;
            Ok(Some(table))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            segment: segment.to_string(),
            source: e,
        }),
    }
}
