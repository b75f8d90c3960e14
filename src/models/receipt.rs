use crate::error::{OpenFaceError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the receipt inside a model directory
pub const RECEIPT_FILE: &str = "install.json";

/// Which source served a patch file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mirror {
    Primary,
    Backup,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatchRecord {
    pub tag: String,
    pub mirror: Mirror,
}

/// Record of a completed provisioning run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstallReceipt {
    pub installed_at: String,
    pub files: usize,
    pub total_bytes: u64,
    pub patches: Vec<PatchRecord>,
}

impl InstallReceipt {
    #[must_use]
    pub fn new(files: usize, total_bytes: u64, patches: Vec<PatchRecord>) -> Self {
        Self {
            installed_at: chrono::Utc::now().to_rfc3339(),
            files,
            total_bytes,
            patches,
        }
    }

    /// Receipt location for a model directory
    #[must_use]
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(RECEIPT_FILE)
    }

    /// Load a receipt, `None` if the file doesn't exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| OpenFaceError::Config(format!("Failed to parse install receipt: {e}")))
    }

    /// Save receipt to file atomically (tmp + rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp_path = path.with_extension("tmp");
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| OpenFaceError::Other(format!("Failed to serialize receipt: {e}")))?;

        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    /// Number of patches that had to come from a backup source
    #[must_use]
    pub fn backup_count(&self) -> usize {
        self.patches
            .iter()
            .filter(|p| p.mirror == Mirror::Backup)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> InstallReceipt {
        InstallReceipt {
            installed_at: "2026-01-01T00:00:00+00:00".to_string(),
            files: 62,
            total_bytes: 470_000_000,
            patches: vec![
                PatchRecord {
                    tag: "0.25".to_string(),
                    mirror: Mirror::Primary,
                },
                PatchRecord {
                    tag: "0.35".to_string(),
                    mirror: Mirror::Backup,
                },
            ],
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = InstallReceipt::path_in(temp_dir.path());

        sample().save(&path).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let loaded = InstallReceipt::load(&path).unwrap().unwrap();
        assert_eq!(loaded, sample());
        assert_eq!(loaded.backup_count(), 1);
    }

    #[test]
    fn test_mirror_serializes_lowercase() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"mirror\":\"primary\""));
        assert!(json.contains("\"mirror\":\"backup\""));
    }

    #[test]
    fn test_load_missing() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = InstallReceipt::load(&temp_dir.path().join(RECEIPT_FILE)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(RECEIPT_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            InstallReceipt::load(&path),
            Err(OpenFaceError::Config(_))
        ));
    }

    #[test]
    fn test_new_stamps_time() {
        let receipt = InstallReceipt::new(1, 10, Vec::new());
        assert!(!receipt.installed_at.is_empty());
        assert_eq!(receipt.backup_count(), 0);
    }
}
