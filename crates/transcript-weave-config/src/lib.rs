use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

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

    #[error("Invalid line file pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// How rendered lines are written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the line files.
    pub corpus_path: PathBuf,
    /// Glob, relative to `corpus_path`, selecting line files.
    #[serde(default = "default_line_pattern")]
    pub line_pattern: String,
    #[serde(default)]
    pub format: OutputFormat,
    /// Rendering threads; defaults to the available parallelism.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

fn default_line_pattern() -> String {
    "*.atf".to_string()
}

impl Config {
    pub fn new(corpus_path: PathBuf) -> Self {
        Self {
            corpus_path,
            line_pattern: default_line_pattern(),
            format: OutputFormat::default(),
            workers: None,
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
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

        // Expand shell variables and tilde in the loaded corpus path
        config.corpus_path = Self::expand_path(&config.corpus_path).unwrap_or(config.corpus_path);

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

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/transcript-weave");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Line files under `corpus_path` matching `line_pattern`, sorted.
    pub fn line_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let pattern = self.corpus_path.join(&self.line_pattern);
        let pattern = pattern.to_string_lossy();
        let paths = glob::glob(&pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        // Unreadable entries are skipped like missing ones.
        let mut files: Vec<PathBuf> = paths.filter_map(Result::ok).filter(|p| p.is_file()).collect();
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
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/transcript-weave/config.toml"));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = toml::from_str(r#"corpus_path = "/tmp/corpus""#).unwrap();

        assert_eq!(config.corpus_path, PathBuf::from("/tmp/corpus"));
        assert_eq!(config.line_pattern, "*.atf");
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.workers, None);
    }

    #[test]
    fn test_format_is_lowercase() {
        let config: Config = toml::from_str(
            r#"
corpus_path = "/tmp/corpus"
format = "html"
workers = 3
"#,
        )
        .unwrap();

        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.workers, Some(3));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("TRANSCRIPT_WEAVE_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$TRANSCRIPT_WEAVE_TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/subdir")));

        unsafe {
            env::remove_var("TRANSCRIPT_WEAVE_TEST_VAR");
        }
    }

    #[test]
    fn test_load_from_nonexistent_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&config_path).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested/config.toml");

        let mut original = Config::new(PathBuf::from("/tmp/test-corpus"));
        original.format = OutputFormat::Html;
        original.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap().unwrap();
        assert_eq!(loaded.corpus_path, original.corpus_path);
        assert_eq!(loaded.format, OutputFormat::Html);
        assert_eq!(loaded.line_pattern, "*.atf");
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "corpus_path = [unclosed").unwrap();

        let err = Config::load_from_path(&config_path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_line_files_are_filtered_and_sorted() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["b.atf", "a.atf", "notes.txt"] {
            std::fs::write(temp_dir.path().join(name), "1. a").unwrap();
        }
        std::fs::create_dir(temp_dir.path().join("dir.atf")).unwrap();

        let config = Config::new(temp_dir.path().to_path_buf());
        let files = config.line_files().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.atf", "b.atf"]);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let mut config = Config::new(PathBuf::from("/tmp"));
        config.line_pattern = "[".to_string();
        assert!(matches!(
            config.line_files(),
            Err(ConfigError::InvalidPattern { .. })
        ));
    }
}
