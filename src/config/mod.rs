//! Configuration module for openface
//!
//! Loads config from `$XDG_CONFIG_HOME/openface/config.toml` or `~/.config/openface/config.toml`.
//! Falls back to built-in defaults if the file doesn't exist.
//! Partial configs are merged with defaults using serde's default attributes.
//!
//! # Example
//!
//! ```no_run
//! use openface::config::Config;
//!
//! let config = Config::load().expect("Failed to load config");
//! println!("Local model dir: {}", config.models.local_dir_name);
//! println!("Repository: {}", config.download.repo_base);
//! ```

pub mod schema;

pub use schema::Config;
