use crate::config::schema::DownloadConfig;
use crate::error::{OpenFaceError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retrieves a single remote file into a local directory
pub trait Fetcher {
    /// Download `url` to `dest_dir/filename`, overwriting any existing file.
    ///
    /// Transport failures (connection errors, non-success status) are
    /// reported as [`OpenFaceError::Download`]. No retries are attempted.
    fn fetch(&self, filename: &str, dest_dir: &Path, url: &str) -> Result<PathBuf>;
}

/// Blocking HTTP fetcher with optional progress bars
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    progress: bool,
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("client", &"Client { ... }")
            .field("progress", &self.progress)
            .finish()
    }
}

impl HttpFetcher {
    /// Create new fetcher from config
    pub fn new(config: &DownloadConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("openface/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(config.timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| OpenFaceError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            progress: config.progress,
        })
    }

    fn progress_bar(&self, filename: &str, total: Option<u64>) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }

        let bar = match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                if let Ok(style) = ProgressStyle::with_template(
                    "{msg:40} [{bar:30}] {bytes}/{total_bytes} ({eta})",
                ) {
                    bar.set_style(style.progress_chars("=> "));
                }
                bar
            }
            None => ProgressBar::new_spinner(),
        };
        bar.set_message(filename.to_string());
        bar
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, filename: &str, dest_dir: &Path, url: &str) -> Result<PathBuf> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| OpenFaceError::Config(format!("Invalid download URL '{url}': {e}")))?;

        tracing::debug!("Fetching {} from {}", filename, url);

        let mut response = self
            .client
            .get(parsed)
            .send()
            .map_err(|e| {
                // Builder errors (unsupported scheme, bad host) are not transport failures
                if e.is_builder() {
                    OpenFaceError::Config(format!("Cannot request download URL '{url}': {e}"))
                } else {
                    OpenFaceError::download(url, e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpenFaceError::download(url, format!("HTTP {status}")));
        }

        let path = dest_dir.join(filename);
        let mut file = File::create(&path)?;
        let progress = self.progress_bar(filename, response.content_length());

        // Read errors are transport failures, write errors are local I/O
        let mut buf = vec![0u8; 64 * 1024];
        let mut written: u64 = 0;
        loop {
            let n = response
                .read(&mut buf)
                .map_err(|e| OpenFaceError::download(url, e))?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n])?;
            written += n as u64;
            progress.set_position(written);
        }
        file.flush()?;
        progress.finish_and_clear();

        if !self.progress {
            println!("* Downloaded '{filename}' ({})", format_bytes(written));
        }
        tracing::debug!("Wrote {} bytes to {}", written, path.display());

        Ok(path)
    }
}

/// Free space available to unprivileged users on the filesystem holding `path`
pub fn available_space(path: &Path) -> Result<u64> {
    let stats = nix::sys::statvfs::statvfs(path)
        .map_err(|e| OpenFaceError::Other(format!("Failed to check disk space: {e}")))?;

    #[allow(clippy::unnecessary_cast)]
    Ok(stats.blocks_available() as u64 * stats.block_size() as u64)
}

/// Format bytes as human-readable string
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
