//! Configuration management for mdmark

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub annotate: AnnotateConfig,
    pub files: FilesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotateConfig {
    /// Commit-ish the old text is read from when none is given on the
    /// command line
    pub base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// File extensions picked up when a directory argument is walked
    pub extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            annotate: AnnotateConfig::default(),
            files: FilesConfig::default(),
        }
    }
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            base: "HEAD".to_string(),
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "markdown".to_string()],
        }
    }
}

impl Config {
    /// Get the platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mdmark")
            .map(|proj_dirs| proj_dirs.config_dir().join("mdmark.toml"))
    }

    /// Load configuration from file, falling back to defaults if missing
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load from a specific path (for testing)
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.annotate.base, "HEAD");
        assert_eq!(config.files.extensions, vec!["md", "markdown"]);
    }

    #[test]
    fn test_load_valid_toml() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(
            b"[annotate]\nbase = \"main\"\n\n[files]\nextensions = [\"md\"]\n",
        )?;

        let config = Config::load_from(file.path())?;
        assert_eq!(config.annotate.base, "main");
        assert_eq!(config.files.extensions, vec!["md"]);

        Ok(())
    }

    #[test]
    fn test_load_partial_toml_keeps_defaults() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"[annotate]\nbase = \"origin/main\"\n")?;

        let config = Config::load_from(file.path())?;
        assert_eq!(config.annotate.base, "origin/main");
        assert_eq!(config.files.extensions, vec!["md", "markdown"]);

        Ok(())
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"invalid toml [[[syntax").unwrap();

        let result = Config::load_from(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_config_path_returns_some() {
        let path = Config::config_path();
        assert!(path.is_some());
        if let Some(p) = path {
            assert!(p.to_string_lossy().ends_with("mdmark.toml"));
        }
    }

    #[test]
    fn test_round_trip_through_toml() -> Result<()> {
        let config = Config::default();
        let toml_str = toml::to_string(&config)?;
        let parsed: Config = toml::from_str(&toml_str)?;
        assert_eq!(parsed.annotate.base, config.annotate.base);
        assert_eq!(parsed.files.extensions, config.files.extensions);
        Ok(())
    }
}
