use crate::config::schema::ModelsConfig;
use crate::error::{OpenFaceError, Result};
use std::path::{Path, PathBuf};

/// Directory name of the per-user install, under the home directory
pub const GLOBAL_DIR_NAME: &str = ".openface";

/// Candidate model directories, local one first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    local: PathBuf,
    global: PathBuf,
}

impl ModelPaths {
    /// Use explicit candidate directories
    #[must_use]
    pub const fn new(local: PathBuf, global: PathBuf) -> Self {
        Self { local, global }
    }

    /// Derive candidates from the working directory, home directory and config
    pub fn from_config(config: &ModelsConfig) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let global = match &config.global_dir {
            Some(dir) => dir.clone(),
            None => default_global_dir()?,
        };

        Ok(Self::new(cwd.join(&config.local_dir_name), global))
    }

    /// Project-local candidate, whether or not it exists
    #[must_use]
    pub fn local_dir(&self) -> &Path {
        &self.local
    }

    /// Per-user candidate, whether or not it exists
    #[must_use]
    pub fn global_dir(&self) -> &Path {
        &self.global
    }

    /// Local model directory, if installed
    #[must_use]
    pub fn resolve_local(&self) -> Option<PathBuf> {
        existing_dir(&self.local)
    }

    /// Global model directory, if installed
    #[must_use]
    pub fn resolve_global(&self) -> Option<PathBuf> {
        existing_dir(&self.global)
    }

    /// The directory to load models from; local installs shadow the global one
    pub fn resolve_active(&self) -> Result<PathBuf> {
        self.resolve_local()
            .or_else(|| self.resolve_global())
            .ok_or_else(|| {
                OpenFaceError::Config(format!(
                    "Could not find a usable model directory (looked in {} and {}).\n\n\
                     Troubleshooting:\n\
                     - Run 'openface download' to install the models in the current folder\n\
                     - Run 'openface install' to install them globally for the current user",
                    self.local.display(),
                    self.global.display()
                ))
            })
    }
}

/// `~/.openface`
pub fn default_global_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(GLOBAL_DIR_NAME))
        .ok_or_else(|| OpenFaceError::Config("Cannot determine home directory".to_string()))
}

fn existing_dir(path: &Path) -> Option<PathBuf> {
    path.is_dir().then(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn candidates(root: &Path) -> ModelPaths {
        ModelPaths::new(root.join("openface_models"), root.join("home/.openface"))
    }

    #[test]
    fn test_nothing_installed() {
        let temp_dir = TempDir::new().unwrap();
        let paths = candidates(temp_dir.path());

        assert!(paths.resolve_local().is_none());
        assert!(paths.resolve_global().is_none());

        let err = paths.resolve_active().unwrap_err();
        assert!(matches!(err, OpenFaceError::Config(_)));
        let msg = err.to_string();
        assert!(msg.contains("openface download"));
        assert!(msg.contains("openface install"));
    }

    #[test]
    fn test_global_only() {
        let temp_dir = TempDir::new().unwrap();
        let paths = candidates(temp_dir.path());
        fs::create_dir_all(paths.global_dir()).unwrap();

        assert_eq!(paths.resolve_active().unwrap(), paths.global_dir());
    }

    #[test]
    fn test_local_shadows_global() {
        let temp_dir = TempDir::new().unwrap();
        let paths = candidates(temp_dir.path());
        fs::create_dir_all(paths.global_dir()).unwrap();
        fs::create_dir_all(paths.local_dir()).unwrap();

        assert_eq!(paths.resolve_active().unwrap(), paths.local_dir());
    }

    #[test]
    fn test_regular_file_is_not_a_model_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = candidates(temp_dir.path());
        fs::write(paths.local_dir(), "not a directory").unwrap();

        assert!(paths.resolve_local().is_none());
        assert!(paths.resolve_active().is_err());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = candidates(temp_dir.path());
        fs::create_dir_all(paths.local_dir()).unwrap();

        let first = paths.resolve_active().unwrap();
        let second = paths.resolve_active().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_config_uses_overrides() {
        let config = ModelsConfig {
            local_dir_name: "my_models".to_string(),
            global_dir: Some(PathBuf::from("/opt/openface")),
        };
        let paths = ModelPaths::from_config(&config).unwrap();
        assert!(paths.local_dir().ends_with("my_models"));
        assert_eq!(paths.global_dir(), Path::new("/opt/openface"));
    }
}
