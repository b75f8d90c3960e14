pub mod config;
pub mod error;
pub mod face;
pub mod models;
pub mod prompt;

pub use error::{OpenFaceError, Result};
