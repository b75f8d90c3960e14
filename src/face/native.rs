use crate::error::Result;
use crate::face::types::{DetectionOptions, ImageFrame, Rect};
use std::path::Path;

/// Entry points of the native landmark detection library.
///
/// Detection calls mirror the native return convention: an empty vector
/// means nothing was found. Face detectors return `[x, y, w, h]` (HAAR) or
/// `[confidence, x, y, w, h]` (HOG-SVM, MTCNN); landmark detectors return all
/// x coordinates followed by all y coordinates.
pub trait LandmarkLibrary {
    /// Native `FaceModelParameters`
    type Params;
    /// Native `CLNF` landmark model
    type Model;

    /// Build parameters from command-line style tokens (`-mloc <path>`, ...)
    fn params_from_args(&self, args: &[String]) -> Result<Self::Params>;

    /// Point the parameters at the HAAR and MTCNN face detector files
    fn set_detector_paths(&self, params: &mut Self::Params, haar: &Path, mtcnn: &Path);

    /// Write the behaviour toggles into the parameters
    fn set_options(&self, params: &mut Self::Params, options: &DetectionOptions);

    fn load_model(&self, path: &Path) -> Result<Self::Model>;

    /// Drop tracking state so the next video frame starts a new sequence
    fn reset(&self, model: &mut Self::Model);

    /// Whether the last fit converged on a face
    fn detection_success(&self, model: &Self::Model) -> bool;

    /// Certainty of the last fit; lower is more certain
    fn detection_certainty(&self, model: &Self::Model) -> f64;

    fn tracking_initialised(&self, model: &Self::Model) -> bool;

    fn model_likelihood(&self, model: &Self::Model) -> f64;

    /// Returns false if the classifier could not be loaded
    fn load_haar(&self, model: &mut Self::Model, path: &Path) -> bool;

    /// Returns false if the detector could not be loaded
    fn load_mtcnn(&self, model: &mut Self::Model, path: &Path) -> bool;

    fn detect_face_haar(&self, image: &ImageFrame<'_>, model: &mut Self::Model) -> Vec<f32>;

    fn detect_face_hog(&self, image: &ImageFrame<'_>, model: &mut Self::Model) -> Vec<f32>;

    fn detect_face_mtcnn(&self, image: &ImageFrame<'_>, model: &mut Self::Model) -> Vec<f32>;

    fn detect_landmarks(
        &self,
        image: &ImageFrame<'_>,
        model: &mut Self::Model,
        params: &Self::Params,
    ) -> Vec<f32>;

    fn detect_landmarks_in_bounds(
        &self,
        image: &ImageFrame<'_>,
        model: &mut Self::Model,
        params: &Self::Params,
        bounds: Rect,
    ) -> Vec<f32>;

    /// Tracking variant; keeps state in `model` between frames
    fn detect_landmarks_in_video(
        &self,
        frame: &ImageFrame<'_>,
        model: &mut Self::Model,
        params: &Self::Params,
    ) -> Vec<f32>;
}
