use crate::error::{OpenFaceError, Result};
use crate::face::detector::FaceDetectorKind;

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from `[x, y, w, h]`
    pub fn from_slice(values: &[f32]) -> Option<Self> {
        match *values {
            [x, y, w, h] => Some(Self::new(x, y, w, h)),
            _ => None,
        }
    }
}

/// A detected face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceDetection {
    /// Absent for HAAR; unbounded above for HOG-SVM
    pub confidence: Option<f32>,
    pub rect: Rect,
}

/// Behaviour toggles of the detection parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionOptions {
    /// Reject fits with an implausible head pose
    pub limit_pose: bool,
    /// Re-check tracked faces with the validator network
    pub validate_detections: bool,
    /// Track with a face template between detections
    pub use_face_template: bool,
    /// Detector used to (re)initialise tracking
    pub face_detector: FaceDetectorKind,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            limit_pose: true,
            validate_detections: true,
            use_face_template: false,
            face_detector: FaceDetectorKind::Mtcnn,
        }
    }
}

/// Flat landmark coordinates: all x values, then all y values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Landmarks(Vec<f32>);

impl Landmarks {
    #[must_use]
    pub fn new(coords: Vec<f32>) -> Self {
        Self(coords)
    }

    /// Empty when detection failed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn num_points(&self) -> usize {
        self.0.len() / 2
    }

    #[must_use]
    pub fn xs(&self) -> &[f32] {
        &self.0[..self.num_points()]
    }

    #[must_use]
    pub fn ys(&self) -> &[f32] {
        &self.0[self.num_points()..self.num_points() * 2]
    }

    /// `(x, y)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.xs().iter().copied().zip(self.ys().iter().copied())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.0
    }
}

/// Borrowed 8-bit image buffer, row-major, interleaved channels (BGR/BGRA)
#[derive(Debug, Clone, Copy)]
pub struct ImageFrame<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    channels: u8,
}

impl<'a> ImageFrame<'a> {
    /// Wrap `data`; it must hold exactly `width * height * channels` bytes
    pub fn new(data: &'a [u8], width: u32, height: u32, channels: u8) -> Result<Self> {
        if !matches!(channels, 1 | 3 | 4) {
            return Err(OpenFaceError::Config(format!(
                "Unsupported channel count {channels} (must be 1, 3 or 4)"
            )));
        }

        let expected = width as usize * height as usize * usize::from(channels);
        if data.len() != expected {
            return Err(OpenFaceError::Config(format!(
                "Image buffer holds {} bytes, expected {expected} for {width}x{height}x{channels}",
                data.len()
            )));
        }

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    #[must_use]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub const fn channels(&self) -> u8 {
        self.channels
    }
}
