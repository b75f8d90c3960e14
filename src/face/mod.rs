//! Face and landmark detection on top of a native OpenFace library.
//!
//! The native library is consumed through [`LandmarkLibrary`]; this module
//! resolves model files from the active model directory and turns the raw
//! float vectors the library returns into typed results.
//!
//! ```no_run
//! # fn demo<L: openface::face::LandmarkLibrary>(library: std::sync::Arc<L>, pixels: &[u8]) -> openface::Result<()> {
//! use openface::config::Config;
//! use openface::face::{FaceDetectorKind, FaceModel, FaceParams, ImageFrame, LandmarkModel};
//! use openface::models::ModelPaths;
//!
//! let paths = ModelPaths::from_config(&Config::load()?.models)?;
//! let params = FaceParams::new(library.as_ref(), &paths)?;
//! let mut model = FaceModel::new(library, &paths, LandmarkModel::CeclmGeneral)?;
//!
//! let frame = ImageFrame::new(pixels, 640, 480, 3)?;
//! if let Some(face) = model.detect_face(&frame, FaceDetectorKind::Mtcnn)? {
//!     let landmarks = model.detect_landmarks(&frame, &params, Some(face.rect));
//!     println!("{} points", landmarks.num_points());
//! }
//! # Ok(())
//! # }
//! ```

mod detector;
mod model;
mod native;
mod types;

pub use detector::{DetectorFamily, FaceDetectorKind, LandmarkModel};
pub use model::{FaceModel, FaceParams, HAAR_DETECTOR_PATH, INIT_MODEL, MTCNN_DETECTOR_PATH};
pub use native::LandmarkLibrary;
pub use types::{DetectionOptions, FaceDetection, ImageFrame, Landmarks, Rect};
