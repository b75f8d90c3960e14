use thiserror::Error;

/// Main error type for openface
#[derive(Error, Debug)]
pub enum OpenFaceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to download '{url}': {reason}\n\nTroubleshooting:\n- Check internet connection\n- Verify firewall or proxy settings\n- Re-run the download; existing files are overwritten")]
    Download { url: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl OpenFaceError {
    /// Build a download error for `url`
    pub fn download(url: &str, reason: impl std::fmt::Display) -> Self {
        Self::Download {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for transport-level failures (the only kind a backup mirror can fix)
    #[must_use]
    pub const fn is_download(&self) -> bool {
        matches!(self, Self::Download { .. })
    }
}

pub type Result<T> = std::result::Result<T, OpenFaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_error_names_url() {
        let err = OpenFaceError::download("https://example.com/a.dat", "404 Not Found");
        assert!(err.is_download());
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/a.dat"));
        assert!(msg.contains("404 Not Found"));
    }

    #[test]
    fn test_config_error_is_not_download() {
        let err = OpenFaceError::Config("bad path".to_string());
        assert!(!err.is_download());
    }
}
