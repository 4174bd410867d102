use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "NOUS_CONFIG";

const DEFAULT_PATTERN: &str = "**/*.md";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid notes pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Folder holding the note files.
    pub notes_path: PathBuf,
    /// Glob, relative to `notes_path`, selecting the notes to render.
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Where rendered HTML is written. Rendered notes go to stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

impl Config {
    pub fn new(notes_path: impl Into<PathBuf>) -> Self {
        Self {
            notes_path: notes_path.into(),
            pattern: default_pattern(),
            output_path: None,
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            log::debug!("No config file at {}", config_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.notes_path = Self::expand_path(&config.notes_path).unwrap_or(config.notes_path);
        config.output_path = config
            .output_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        log::info!("Loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// `$NOUS_CONFIG` when set, otherwise `~/.config/nous/config.toml`.
    pub fn config_path() -> PathBuf {
        Self::config_path_with_override(std::env::var_os(CONFIG_ENV_VAR))
    }

    fn config_path_with_override(env_override: Option<OsString>) -> PathBuf {
        match env_override {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => {
                let config_dir = shellexpand::tilde("~/.config/nous");
                PathBuf::from(config_dir.as_ref()).join("config.toml")
            }
        }
    }

    /// Note files under `notes_path` matching `pattern`, sorted by path.
    pub fn note_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let root = glob::Pattern::escape(&self.notes_path.to_string_lossy());
        let pattern = format!("{root}/{}", self.pattern);

        let paths = glob::glob(&pattern)
            .map_err(|source| ConfigError::InvalidPattern { pattern, source })?;

        let mut files: Vec<PathBuf> = paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    log::warn!("Skipping unreadable path: {e}");
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        files.sort();
        Ok(files)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_path() {
        let config_path = Config::config_path_with_override(None);
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/nous/config.toml"));
    }

    #[test]
    fn test_config_path_env_override() {
        let config_path =
            Config::config_path_with_override(Some(OsString::from("/etc/nous/notes.toml")));
        assert_eq!(config_path, PathBuf::from("/etc/nous/notes.toml"));
    }

    #[test]
    fn test_empty_env_override_is_ignored() {
        let config_path = Config::config_path_with_override(Some(OsString::new()));
        assert!(config_path.ends_with(".config/nous/config.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            notes_path: PathBuf::from("/tmp/test-notes"),
            pattern: "*.txt".to_string(),
            output_path: Some(PathBuf::from("/tmp/site")),
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = toml::from_str(r#"notes_path = "/notes""#).unwrap();

        assert_eq!(config, Config::new("/notes"));
        assert_eq!(config.pattern, "**/*.md");
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("NOUS_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$NOUS_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("NOUS_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "notes_path = [not toml").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            notes_path: PathBuf::from("/tmp/test-notes"),
            pattern: default_pattern(),
            output_path: Some(PathBuf::from("/tmp/html")),
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        unsafe {
            env::set_var("NOUS_NOTES_ROOT", "/custom/notes");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "notes_path = \"$NOUS_NOTES_ROOT/my-notes\"\noutput_path = \"$NOUS_NOTES_ROOT/html\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.notes_path, PathBuf::from("/custom/notes/my-notes"));
        assert_eq!(config.output_path, Some(PathBuf::from("/custom/notes/html")));

        unsafe {
            env::remove_var("NOUS_NOTES_ROOT");
        }
    }

    #[test]
    fn test_note_files_matches_pattern_recursively() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("journal")).unwrap();
        std::fs::write(root.join("b.md"), "# b").unwrap();
        std::fs::write(root.join("a.md"), "# a").unwrap();
        std::fs::write(root.join("journal").join("monday.md"), "- x").unwrap();
        std::fs::write(root.join("ignored.txt"), "nope").unwrap();

        let files = Config::new(root).note_files().unwrap();

        assert_eq!(
            files,
            vec![
                root.join("a.md"),
                root.join("b.md"),
                root.join("journal").join("monday.md"),
            ]
        );
    }

    #[test]
    fn test_note_files_invalid_pattern() {
        let mut config = Config::new("/notes");
        config.pattern = "***/[".to_string();

        let err = config.note_files().unwrap_err();

        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }
}
