//! Settings file loading
//!
//! The optional TOML config file carries the enumeration tuning values:
//!
//! ```toml
//! [traversal]
//! min-paths-to-investigate = 10
//! idle-iteration-margin = 20
//! max-iterations = 1000000
//! ```

use crate::errors::{CliError, Result};
use latency_graph::TraversalSettings;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Top-level layout of the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Enumeration settings
    #[serde(default)]
    pub traversal: TraversalSettings,
}

impl ConfigFile {
    /// Parse a config file body.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::ConfigInvalid`] if the TOML does not match the layout.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }
}

/// Load traversal settings from `path`, or defaults when no path is given.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_settings(path: Option<&Path>) -> Result<TraversalSettings> {
    let Some(path) = path else {
        return Ok(TraversalSettings::default());
    };

    let content = std::fs::read_to_string(path).map_err(|source| CliError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ConfigFile::parse(&content, path)?;
    debug!(path = %path.display(), settings = ?config.traversal, "Loaded config file");
    Ok(config.traversal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_no_path_uses_defaults() {
        assert_eq!(load_settings(None).unwrap(), TraversalSettings::default());
    }

    #[test]
    fn test_load_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[traversal]\nmin-paths-to-investigate = 3").unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.min_paths_to_investigate, 3);
        assert_eq!(settings.idle_iteration_margin, 20);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ConfigFile::parse("", Path::new("empty.toml")).unwrap();
        assert_eq!(config.traversal, TraversalSettings::default());
    }

    #[test]
    fn test_unknown_table_is_rejected() {
        let result = ConfigFile::parse("[graph]\nfile = \"x\"", Path::new("bad.toml"));
        assert!(matches!(result, Err(CliError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_settings(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(CliError::ConfigIo { .. })));
    }
}
