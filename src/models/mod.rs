pub mod download;
pub mod installer;
pub mod manager;
pub mod manifest;
pub mod paths;
pub mod receipt;
pub mod registry;
pub mod verify;

pub use download::{Fetcher, HttpFetcher};
pub use installer::TreeInstaller;
pub use manager::{Outcome, Provisioner};
pub use manifest::{ManifestNode, MODEL_FILES};
pub use paths::ModelPaths;
pub use receipt::InstallReceipt;
pub use registry::PatchSource;
pub use verify::{verify_installation, Verification};
