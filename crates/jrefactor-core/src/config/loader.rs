//! Configuration file discovery and loading

use super::style_config::JrefactorConfig;
use crate::error::RefactorError;
use crate::result::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names in priority order
const CONFIG_FILE_NAMES: &[&str] = &[
    ".jrefactor.toml",
    ".jrefactor.json",
    "jrefactor.yaml",
    "jrefactor.yml",
    "jrefactor.json",
];

/// Configuration loader for discovering and loading config files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Auto-discover a config file by traversing upward from `start_path`
    ///
    /// Returns `None` when the filesystem root is reached without a match.
    pub fn auto_discover(start_path: &Path) -> Result<Option<PathBuf>> {
        let mut current = start_path.canonicalize().map_err(|e| {
            RefactorError::config_error(format!("Invalid path '{}': {e}", start_path.display()))
        })?;

        loop {
            for filename in CONFIG_FILE_NAMES {
                let config_path = current.join(filename);
                if config_path.is_file() {
                    tracing::debug!("Found config: {}", config_path.display());
                    return Ok(Some(config_path));
                }
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        Ok(None)
    }

    /// Load configuration from a specific file
    ///
    /// Supports TOML (.toml), YAML (.yaml, .yml) and JSON (.json)
    pub fn load_from_file(path: &Path) -> Result<JrefactorConfig> {
        let content = fs::read_to_string(path).map_err(|e| RefactorError::io_error(path, e))?;
        let ext = path.extension().and_then(|e| e.to_str());

        let parsed = match ext {
            Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
            Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
            _ => Err(
                "unsupported file extension (expected .toml, .yaml, .yml or .json)".to_string(),
            ),
        };

        parsed.map_err(|message| {
            RefactorError::config_error(format!(
                "Failed to load config from '{}': {message}",
                path.display()
            ))
        })
    }

    /// Load config from an explicit path, or auto-discover from `start_dir`
    /// (current directory by default)
    ///
    /// Falls back to the built-in defaults when discovery finds nothing.
    pub fn load(custom_path: Option<&Path>, start_dir: Option<&Path>) -> Result<JrefactorConfig> {
        if let Some(path) = custom_path {
            if !path.exists() {
                return Err(RefactorError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Self::load_from_file(path);
        }

        let search_dir = start_dir.unwrap_or_else(|| Path::new("."));
        match Self::auto_discover(search_dir)? {
            Some(path) => Self::load_from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(JrefactorConfig::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndentStyle;
    use tempfile::TempDir;

    fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            ".jrefactor.toml",
            r#"
[style]
indentStyle = "tabs"
indentSize = 1
"#,
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.style.indent_style, IndentStyle::Tabs);
        assert_eq!(config.style.indent_size, 1);
    }

    #[test]
    fn test_load_from_file_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(
            temp_dir.path(),
            "jrefactor.yaml",
            "style:\n  indentSize: 2\n",
        );

        let config = ConfigLoader::load_from_file(&config_path).unwrap();
        assert_eq!(config.style.indent_size, 2);
        assert_eq!(config.style.indent_style, IndentStyle::Spaces);
    }

    #[test]
    fn test_auto_discover_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("src/main/java");
        fs::create_dir_all(&nested).unwrap();
        create_temp_config(temp_dir.path(), "jrefactor.json", r#"{"style": {}}"#);

        let found = ConfigLoader::auto_discover(&nested).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), "jrefactor.json");
    }

    #[test]
    fn test_auto_discover_priority() {
        let temp_dir = TempDir::new().unwrap();
        create_temp_config(temp_dir.path(), "jrefactor.json", "{}");
        create_temp_config(temp_dir.path(), ".jrefactor.toml", "");

        let found = ConfigLoader::auto_discover(temp_dir.path()).unwrap();
        assert_eq!(found.unwrap().file_name().unwrap(), ".jrefactor.toml");
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_temp_config(temp_dir.path(), "jrefactor.json", "{ invalid json }");

        let err = ConfigLoader::load_from_file(&config_path).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }

    #[test]
    fn test_load_missing_custom_path() {
        let result = ConfigLoader::load(Some(Path::new("nonexistent.toml")), None);
        assert!(result.is_err());
    }
}
