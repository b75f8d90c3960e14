use crate::error::{OpenFaceError, Result};
use crate::models::download::{available_space, format_bytes, Fetcher};
use crate::models::installer::TreeInstaller;
use crate::models::manifest::{
    APPROX_SIZE_MB, CLASSIFIER_DIR, CLASSIFIER_FILE, CLASSIFIER_SUBPATH, MODEL_DIR, MODEL_FILES,
    PATCH_DIR, REPO_BASE,
};
use crate::models::paths::ModelPaths;
use crate::models::receipt::{InstallReceipt, Mirror, PatchRecord};
use crate::models::registry::{PatchSource, PATCHES};
use crate::prompt::Confirm;
use std::fs;
use std::path::{Path, PathBuf};

/// How a provisioning run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Installed(PathBuf),
    /// The user answered no; nothing was touched
    Declined,
}

/// Downloads and installs the full OpenFace model set
pub struct Provisioner<'a> {
    fetcher: &'a dyn Fetcher,
    confirm: &'a mut dyn Confirm,
    paths: &'a ModelPaths,
    repo_base: String,
}

impl<'a> Provisioner<'a> {
    /// Create new provisioner
    pub fn new(fetcher: &'a dyn Fetcher, confirm: &'a mut dyn Confirm, paths: &'a ModelPaths) -> Self {
        Self {
            fetcher,
            confirm,
            paths,
            repo_base: REPO_BASE.to_string(),
        }
    }

    /// Override the repository the small model files come from
    #[must_use]
    pub fn with_repo_base(mut self, repo_base: impl Into<String>) -> Self {
        self.repo_base = repo_base.into();
        self
    }

    /// Install into `dest`, or the project-local directory when `None`.
    ///
    /// The parent of an explicit `dest` must already exist.
    pub fn download_models(&mut self, dest: Option<&Path>) -> Result<Outcome> {
        let target = match dest {
            None => self.paths.local_dir().to_path_buf(),
            Some(path) => {
                let parent = parent_dir(path);
                if !parent.is_dir() {
                    return Err(OpenFaceError::Config(format!(
                        "Path '{}' does not exist",
                        parent.display()
                    )));
                }
                path.to_path_buf()
            }
        };

        self.provision(&target)
    }

    /// Install into the per-user directory (`~/.openface`)
    pub fn install_models(&mut self) -> Result<Outcome> {
        let global = self.paths.global_dir().to_path_buf();
        self.download_models(Some(&global))
    }

    fn provision(&mut self, target: &Path) -> Result<Outcome> {
        println!(
            "\nAll OpenFace models will be downloaded to '{}'\n",
            target.display()
        );
        warn_if_low_space(&parent_dir(target));

        let prompt = format!(
            "This will take approximately {APPROX_SIZE_MB} MB of disk space. Continue?"
        );
        if !self.confirm.confirm(&prompt)? {
            tracing::info!("Provisioning declined");
            return Ok(Outcome::Declined);
        }

        if target.is_dir() {
            let prompt = format!("Directory '{}' already exists. Overwrite?", target.display());
            if !self.confirm.confirm(&prompt)? {
                tracing::info!("Overwrite of {} declined", target.display());
                return Ok(Outcome::Declined);
            }
            tracing::info!("Removing existing model directory {}", target.display());
            fs::remove_dir_all(target)?;
        }
        fs::create_dir(target)?;

        println!("\n=== Downloading OpenFace models ===\n");
        println!("Destination: {}\n", target.display());

        // Small models from the source repository
        let installer = TreeInstaller::new(self.fetcher, &self.repo_base);
        let mut files = installer.install_tree(&MODEL_FILES, target, &[MODEL_DIR])?;
        tracing::info!("Installed {} model files", files.len());

        // OpenCV HAAR classifier
        let classifier_dir = target.join(CLASSIFIER_DIR);
        fs::create_dir_all(&classifier_dir)?;
        let classifier_url = format!("{}{CLASSIFIER_SUBPATH}{CLASSIFIER_FILE}", self.repo_base);
        files.push(
            self.fetcher
                .fetch(CLASSIFIER_FILE, &classifier_dir, &classifier_url)?,
        );

        // CEN patches from external mirrors
        let patch_dir = target.join(MODEL_DIR).join(PATCH_DIR);
        let mut patches = Vec::with_capacity(PATCHES.len());
        for patch in PATCHES {
            let (path, mirror) = self.fetch_patch(patch, &patch_dir)?;
            files.push(path);
            patches.push(PatchRecord {
                tag: patch.tag.to_string(),
                mirror,
            });
        }

        let total_bytes: u64 = files
            .iter()
            .filter_map(|f| fs::metadata(f).ok())
            .map(|m| m.len())
            .sum();
        let receipt = InstallReceipt::new(files.len(), total_bytes, patches);
        receipt.save(&InstallReceipt::path_in(target))?;

        tracing::info!(
            "Installed {} files ({}) to {}",
            files.len(),
            format_bytes(total_bytes),
            target.display()
        );
        println!("\n=== Downloaded all OpenFace models successfully! ===\n");

        Ok(Outcome::Installed(target.to_path_buf()))
    }

    /// Fetch from the primary source, falling back to the backup once
    fn fetch_patch(&self, patch: &PatchSource, dest_dir: &Path) -> Result<(PathBuf, Mirror)> {
        let name = patch.file_name();

        match self.fetcher.fetch(&name, dest_dir, patch.primary) {
            Ok(path) => Ok((path, Mirror::Primary)),
            Err(OpenFaceError::Download { url, reason }) => {
                tracing::warn!(
                    "Primary source for {} failed ({}: {}), trying backup",
                    name,
                    url,
                    reason
                );
                let path = self.fetcher.fetch(&name, dest_dir, patch.backup)?;
                Ok((path, Mirror::Backup))
            }
            Err(e) => Err(e),
        }
    }
}

/// Parent directory, treating a bare file name as relative to `.`
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => path.to_path_buf(),
    }
}

fn warn_if_low_space(dir: &Path) {
    let required = APPROX_SIZE_MB * 1_024 * 1_024;
    match available_space(dir) {
        Ok(available) if available < required => tracing::warn!(
            "Only {} free at {}, about {} MB are needed",
            format_bytes(available),
            dir.display(),
            APPROX_SIZE_MB
        ),
        Ok(_) => {}
        Err(e) => tracing::debug!("{}", e),
    }
}
