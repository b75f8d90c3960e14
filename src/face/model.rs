use crate::error::{OpenFaceError, Result};
use crate::face::detector::{FaceDetectorKind, LandmarkModel};
use crate::face::native::LandmarkLibrary;
use crate::face::types::{DetectionOptions, FaceDetection, ImageFrame, Landmarks, Rect};
use crate::models::manifest::MODEL_DIR;
use crate::models::paths::ModelPaths;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Model file the native parameters need to initialise without error
pub const INIT_MODEL: &str = "main_ceclm_general.txt";
/// HAAR classifier, relative to the model directory
pub const HAAR_DETECTOR_PATH: &str = "classifiers/haarcascade_frontalface_alt.xml";
/// MTCNN face detector, relative to the model directory
pub const MTCNN_DETECTOR_PATH: &str = "model/mtcnn_detector/MTCNN_detector.txt";

/// Detection parameters bound to the active model directory
pub struct FaceParams<L: LandmarkLibrary> {
    params: L::Params,
    model_dir: PathBuf,
    options: DetectionOptions,
}

impl<L: LandmarkLibrary> FaceParams<L> {
    /// Resolve the active model directory and build native parameters
    pub fn new(library: &L, paths: &ModelPaths) -> Result<Self> {
        let model_dir = paths.resolve_active()?;

        let init_path = model_dir.join(MODEL_DIR).join(INIT_MODEL);
        let init_model = init_path.to_str().ok_or_else(|| {
            OpenFaceError::Config(format!(
                "Model path {} is not valid UTF-8",
                init_path.display()
            ))
        })?;
        let args = vec![" ".to_string(), "-mloc".to_string(), init_model.to_string()];
        let mut params = library.params_from_args(&args)?;
        library.set_detector_paths(
            &mut params,
            &model_dir.join(HAAR_DETECTOR_PATH),
            &model_dir.join(MTCNN_DETECTOR_PATH),
        );

        tracing::debug!("Face parameters initialised from {}", model_dir.display());
        Ok(Self {
            params,
            model_dir,
            options: DetectionOptions::default(),
        })
    }

    /// Apply new behaviour toggles
    pub fn set_options(&mut self, library: &L, options: DetectionOptions) {
        library.set_options(&mut self.params, &options);
        self.options = options;
    }

    #[must_use]
    pub const fn options(&self) -> DetectionOptions {
        self.options
    }

    #[must_use]
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    #[must_use]
    pub fn native(&self) -> &L::Params {
        &self.params
    }
}

/// A loaded landmark model with HAAR and MTCNN face detectors
pub struct FaceModel<L: LandmarkLibrary> {
    library: Arc<L>,
    model: L::Model,
    variant: LandmarkModel,
    model_path: PathBuf,
}

impl<L: LandmarkLibrary> FaceModel<L> {
    /// Load `variant` from the active model directory
    pub fn new(library: Arc<L>, paths: &ModelPaths, variant: LandmarkModel) -> Result<Self> {
        let model_dir = paths.resolve_active()?;
        let model_path = model_dir.join(MODEL_DIR).join(variant.file_name());

        let mut model = library.load_model(&model_path)?;

        let haar = model_dir.join(HAAR_DETECTOR_PATH);
        if !library.load_haar(&mut model, &haar) {
            tracing::warn!("Failed to load HAAR face detector from {}", haar.display());
        }
        let mtcnn = model_dir.join(MTCNN_DETECTOR_PATH);
        if !library.load_mtcnn(&mut model, &mtcnn) {
            tracing::warn!("Failed to load MTCNN face detector from {}", mtcnn.display());
        }

        tracing::info!("Loaded {} landmark model from {}", variant, model_path.display());
        Ok(Self {
            library,
            model,
            variant,
            model_path,
        })
    }

    /// Load a variant by name; unknown names fail before touching the filesystem
    pub fn from_name(library: Arc<L>, paths: &ModelPaths, name: &str) -> Result<Self> {
        let variant: LandmarkModel = name.parse()?;
        Self::new(library, paths, variant)
    }

    #[must_use]
    pub const fn variant(&self) -> LandmarkModel {
        self.variant
    }

    #[must_use]
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Forget tracking state, e.g. between video sequences
    pub fn reset(&mut self) {
        tracing::debug!("Resetting {} tracking state", self.variant);
        self.library.reset(&mut self.model);
    }

    /// Whether the last landmark fit succeeded
    #[must_use]
    pub fn detection_success(&self) -> bool {
        self.library.detection_success(&self.model)
    }

    #[must_use]
    pub fn detection_certainty(&self) -> f64 {
        self.library.detection_certainty(&self.model)
    }

    #[must_use]
    pub fn tracking_initialised(&self) -> bool {
        self.library.tracking_initialised(&self.model)
    }

    #[must_use]
    pub fn model_likelihood(&self) -> f64 {
        self.library.model_likelihood(&self.model)
    }

    /// Find the most prominent face, if any
    pub fn detect_face(
        &mut self,
        image: &ImageFrame<'_>,
        detector: FaceDetectorKind,
    ) -> Result<Option<FaceDetection>> {
        let raw = match detector {
            FaceDetectorKind::Haar => self.library.detect_face_haar(image, &mut self.model),
            FaceDetectorKind::HogSvm => self.library.detect_face_hog(image, &mut self.model),
            FaceDetectorKind::Mtcnn => self.library.detect_face_mtcnn(image, &mut self.model),
        };

        parse_detection(detector, &raw)
    }

    /// Fit landmarks on a still image, optionally inside `bounds`
    pub fn detect_landmarks(
        &mut self,
        image: &ImageFrame<'_>,
        params: &FaceParams<L>,
        bounds: Option<Rect>,
    ) -> Landmarks {
        let coords = match bounds {
            Some(rect) => self.library.detect_landmarks_in_bounds(
                image,
                &mut self.model,
                &params.params,
                rect,
            ),
            None => self
                .library
                .detect_landmarks(image, &mut self.model, &params.params),
        };
        to_landmarks(coords)
    }

    /// Track landmarks across consecutive video frames
    pub fn detect_landmarks_video(
        &mut self,
        frame: &ImageFrame<'_>,
        params: &FaceParams<L>,
    ) -> Landmarks {
        to_landmarks(
            self.library
                .detect_landmarks_in_video(frame, &mut self.model, &params.params),
        )
    }
}

/// An odd-length result cannot be split into x and y halves
fn to_landmarks(coords: Vec<f32>) -> Landmarks {
    if coords.len() % 2 != 0 {
        tracing::warn!(
            "Landmark detector returned {} values, discarding the result",
            coords.len()
        );
        return Landmarks::default();
    }
    Landmarks::new(coords)
}

fn parse_detection(detector: FaceDetectorKind, raw: &[f32]) -> Result<Option<FaceDetection>> {
    if raw.is_empty() {
        return Ok(None);
    }

    let (confidence, bbox) = if detector.reports_confidence() {
        (Some(raw[0]), &raw[1..])
    } else {
        (None, raw)
    };

    let rect = Rect::from_slice(bbox).ok_or_else(|| {
        OpenFaceError::Other(format!(
            "{detector} face detector returned {} values",
            raw.len()
        ))
    })?;

    Ok(Some(FaceDetection { confidence, rect }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_haar() {
        let result = parse_detection(FaceDetectorKind::Haar, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(
            result,
            Some(FaceDetection {
                confidence: None,
                rect: Rect::new(1.0, 2.0, 3.0, 4.0),
            })
        );
    }

    #[test]
    fn test_parse_hog_confidence_above_one() {
        let result = parse_detection(FaceDetectorKind::HogSvm, &[2.5, 1.0, 2.0, 3.0, 4.0])
            .unwrap()
            .unwrap();
        assert_eq!(result.confidence, Some(2.5));
        assert_eq!(result.rect, Rect::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_parse_nothing_found() {
        for detector in FaceDetectorKind::ALL {
            assert_eq!(parse_detection(detector, &[]).unwrap(), None);
        }
    }

    #[test]
    fn test_odd_landmark_count_is_empty() {
        assert!(to_landmarks(vec![1.0, 2.0, 3.0]).is_empty());
        assert_eq!(to_landmarks(vec![1.0, 2.0]).num_points(), 1);
        assert!(to_landmarks(Vec::new()).is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_detection(FaceDetectorKind::Mtcnn, &[0.9, 1.0, 2.0, 3.0]).is_err());
        assert!(parse_detection(FaceDetectorKind::Haar, &[1.0, 2.0, 3.0, 4.0, 5.0]).is_err());
    }
}
