//! `sqlweave.toml` configuration.
//!
//! ```toml
//! dialect = "postgres"
//! layout = "compact"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::writer::Layout;

pub const CONFIG_FILE: &str = "sqlweave.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Registry key used when none is given on the command line.
    pub dialect: String,
    pub layout: Layout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: "ansi".to_string(),
            layout: Layout::default(),
        }
    }
}

impl Config {
    /// Resolve configuration: `explicit` must exist when given; otherwise
    /// `./sqlweave.toml`, then the user config directory, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for path in Self::search_paths() {
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        tracing::debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), dialect = %config.dialect, "loaded configuration");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("sqlweave").join("config.toml"));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.dialect, "ansi");
        assert_eq!(config.layout, Layout::Pretty);
    }

    #[test]
    fn test_parse() {
        let config = Config::parse("dialect = \"postgres\"\nlayout = \"compact\"\n").unwrap();
        assert_eq!(config.dialect, "postgres");
        assert_eq!(config.layout, Layout::Compact);
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = Config::parse("dialekt = \"mysql\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let missing = std::env::temp_dir().join("sqlweave-missing-config.toml");
        let err = Config::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("sqlweave-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "layout = \"compact\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.dialect, "ansi");
        assert_eq!(config.layout, Layout::Compact);
    }
}
