use crate::error::Result;
use crate::models::download::Fetcher;
use crate::models::manifest::{ManifestNode, MODEL_SUBPATH};
use std::fs;
use std::path::{Path, PathBuf};

/// Mirrors a manifest tree onto disk, fetching every leaf
pub struct TreeInstaller<'a, F: Fetcher + ?Sized> {
    fetcher: &'a F,
    repo_base: &'a str,
}

impl<'a, F: Fetcher + ?Sized> TreeInstaller<'a, F> {
    #[must_use]
    pub const fn new(fetcher: &'a F, repo_base: &'a str) -> Self {
        Self { fetcher, repo_base }
    }

    /// Install `node` under `root/prefix...`, returning the files written.
    ///
    /// Stops at the first failed fetch; files already written stay on disk.
    pub fn install_tree(
        &self,
        node: &ManifestNode,
        root: &Path,
        prefix: &[&str],
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        let mut path: Vec<&str> = prefix.to_vec();
        self.install_dir(node, root, &mut path, &mut written)?;
        Ok(written)
    }

    fn install_dir(
        &self,
        node: &ManifestNode,
        root: &Path,
        path: &mut Vec<&str>,
        written: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let dir_path = path.iter().fold(root.to_path_buf(), |acc, seg| acc.join(seg));
        fs::create_dir_all(&dir_path)?;

        let ManifestNode::Directory(entries) = node else {
            return Ok(());
        };

        for entry in *entries {
            match entry.node {
                ManifestNode::Leaf => {
                    let url = self.leaf_url(path, entry.name);
                    written.push(self.fetcher.fetch(entry.name, &dir_path, &url)?);
                }
                ManifestNode::Directory(_) => {
                    path.push(entry.name);
                    self.install_dir(&entry.node, root, path, written)?;
                    path.pop();
                }
            }
        }

        Ok(())
    }

    fn leaf_url(&self, path: &[&str], name: &str) -> String {
        let mut url = format!("{}{}", self.repo_base, MODEL_SUBPATH);
        for seg in path {
            url.push_str(seg);
            url.push('/');
        }
        url.push_str(name);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OpenFaceError;
    use crate::models::manifest::Entry;
    use std::cell::RefCell;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        urls: RefCell<Vec<String>>,
        fail_on: Option<&'static str>,
    }

    impl Fetcher for Recorder {
        fn fetch(&self, filename: &str, dest_dir: &Path, url: &str) -> Result<PathBuf> {
            self.urls.borrow_mut().push(url.to_string());
            if self.fail_on == Some(filename) {
                return Err(OpenFaceError::download(url, "connection reset"));
            }
            let path = dest_dir.join(filename);
            fs::write(&path, url)?;
            Ok(path)
        }
    }

    static TREE: ManifestNode = ManifestNode::Directory(&[
        Entry {
            name: "pdms",
            node: ManifestNode::Directory(&[Entry {
                name: "pdm.txt",
                node: ManifestNode::Leaf,
            }]),
        },
        Entry {
            name: "main.txt",
            node: ManifestNode::Leaf,
        },
        Entry {
            name: "tail.txt",
            node: ManifestNode::Leaf,
        },
    ]);

    #[test]
    fn test_urls_follow_tree() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = Recorder::default();
        let installer = TreeInstaller::new(&fetcher, "https://host/");

        let written = installer
            .install_tree(&TREE, temp_dir.path(), &["model"])
            .unwrap();

        assert_eq!(
            *fetcher.urls.borrow(),
            vec![
                "https://host/lib/local/LandmarkDetector/model/pdms/pdm.txt",
                "https://host/lib/local/LandmarkDetector/model/main.txt",
                "https://host/lib/local/LandmarkDetector/model/tail.txt",
            ]
        );
        assert_eq!(written.len(), 3);
        assert!(temp_dir.path().join("model/pdms/pdm.txt").is_file());
        assert!(temp_dir.path().join("model/main.txt").is_file());
    }

    #[test]
    fn test_empty_prefix_installs_at_root() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = Recorder::default();
        let installer = TreeInstaller::new(&fetcher, "https://host/");

        installer.install_tree(&TREE, temp_dir.path(), &[]).unwrap();

        assert!(temp_dir.path().join("pdms/pdm.txt").is_file());
        assert_eq!(
            fetcher.urls.borrow()[1],
            "https://host/lib/local/LandmarkDetector/main.txt"
        );
    }

    #[test]
    fn test_first_failure_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = Recorder {
            fail_on: Some("main.txt"),
            ..Recorder::default()
        };
        let installer = TreeInstaller::new(&fetcher, "https://host/");

        let err = installer
            .install_tree(&TREE, temp_dir.path(), &["model"])
            .unwrap_err();

        assert!(err.is_download());
        // tail.txt is never attempted, pdm.txt stays behind
        assert_eq!(fetcher.urls.borrow().len(), 2);
        assert!(temp_dir.path().join("model/pdms/pdm.txt").is_file());
        assert!(!temp_dir.path().join("model/tail.txt").exists());
    }

    #[test]
    fn test_reinstall_is_idempotent_for_directories() {
        let temp_dir = TempDir::new().unwrap();
        let fetcher = Recorder::default();
        let installer = TreeInstaller::new(&fetcher, "https://host/");

        installer.install_tree(&TREE, temp_dir.path(), &["model"]).unwrap();
        installer.install_tree(&TREE, temp_dir.path(), &["model"]).unwrap();

        assert_eq!(fetcher.urls.borrow().len(), 6);
    }
}
