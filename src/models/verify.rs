use crate::error::{OpenFaceError, Result};
use crate::models::manifest::{
    CLASSIFIER_DIR, CLASSIFIER_FILE, MODEL_DIR, MODEL_FILES, PATCH_DIR,
};
use crate::models::receipt::InstallReceipt;
use crate::models::registry::PATCHES;
use std::path::{Path, PathBuf};

/// Result of checking a model directory
#[derive(Debug, Clone)]
pub struct Verification {
    pub root: PathBuf,
    pub expected: usize,
    pub missing: Vec<PathBuf>,
    pub receipt: Option<InstallReceipt>,
}

impl Verification {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Every file a complete installation contains, relative to its root
#[must_use]
pub fn expected_files() -> Vec<PathBuf> {
    let model_dir = Path::new(MODEL_DIR);
    let mut files: Vec<PathBuf> = MODEL_FILES
        .leaves()
        .iter()
        .map(|leaf| model_dir.join(leaf.relative_path()))
        .collect();

    files.push(Path::new(CLASSIFIER_DIR).join(CLASSIFIER_FILE));
    files.extend(
        PATCHES
            .iter()
            .map(|p| model_dir.join(PATCH_DIR).join(p.file_name())),
    );
    files
}

/// Check `root` for every expected file
pub fn verify_installation(root: &Path) -> Result<Verification> {
    if !root.is_dir() {
        return Err(OpenFaceError::Config(format!(
            "Model directory '{}' does not exist",
            root.display()
        )));
    }

    let expected = expected_files();
    let missing: Vec<PathBuf> = expected
        .iter()
        .filter(|rel| !root.join(rel).is_file())
        .cloned()
        .collect();

    let receipt = match InstallReceipt::load(&InstallReceipt::path_in(root)) {
        Ok(receipt) => receipt,
        Err(e) => {
            tracing::warn!("Ignoring unreadable install receipt: {}", e);
            None
        }
    };

    tracing::debug!(
        "Verified {}: {} of {} files missing",
        root.display(),
        missing.len(),
        expected.len()
    );

    Ok(Verification {
        root: root.to_path_buf(),
        expected: expected.len(),
        missing,
        receipt,
    })
}
