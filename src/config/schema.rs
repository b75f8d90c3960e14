use crate::error::{OpenFaceError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub models: ModelsConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ModelsConfig {
    /// Directory name looked up under the current working directory
    #[serde(default = "default_local_dir_name")]
    pub local_dir_name: String,
    /// Per-user install location; `~/.openface` when unset
    pub global_dir: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DownloadConfig {
    #[serde(default = "default_repo_base")]
    pub repo_base: String,
    /// Whole-request timeout; unset means no timeout (patch files are large)
    pub timeout_secs: Option<u64>,
    /// Connection-establishment timeout, always applied
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_true")]
    pub progress: bool,
}

// Default value functions
fn default_local_dir_name() -> String {
    "openface_models".to_string()
}
fn default_repo_base() -> String {
    crate::models::manifest::REPO_BASE.to_string()
}
const fn default_connect_timeout_secs() -> u64 {
    30
}
const fn default_true() -> bool {
    true
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            local_dir_name: default_local_dir_name(),
            global_dir: None,
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            repo_base: default_repo_base(),
            timeout_secs: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            progress: default_true(),
        }
    }
}

impl Config {
    /// Load config from the user config directory, or defaults if absent
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load config from an explicit file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            OpenFaceError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Location of the user config file
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("openface").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.models.local_dir_name, "openface_models");
        assert!(config.models.global_dir.is_none());
        assert!(config.download.repo_base.starts_with("https://"));
        assert!(config.download.timeout_secs.is_none());
        assert_eq!(config.download.connect_timeout_secs, 30);
        assert!(config.download.progress);
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config_merges_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[models]\nglobal_dir = \"/opt/openface\"\n\n[download]\ntimeout_secs = 120\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.models.local_dir_name, "openface_models");
        assert_eq!(
            config.models.global_dir,
            Some(PathBuf::from("/opt/openface"))
        );
        assert_eq!(config.download.timeout_secs, Some(120));
        assert_eq!(config.download.connect_timeout_secs, 30);
        assert!(config.download.progress);
    }

    #[test]
    fn test_invalid_config_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[models\nbroken").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(OpenFaceError::Config(_))));
    }
}
