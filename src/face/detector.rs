use crate::error::{OpenFaceError, Result};
use crate::models::registry::suggest;
use std::fmt;
use std::str::FromStr;

/// Landmark fitting algorithm family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorFamily {
    Clm,
    Clnf,
    Ceclm,
}

/// Trained landmark model variants shipped with OpenFace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LandmarkModel {
    /// Fastest, least accurate
    ClmGeneral,
    /// CLM trained on 300W only
    ClmWild,
    ClnfGeneral,
    /// CLNF trained on 300W only
    ClnfWild,
    /// CLNF trained on Multi-PIE only
    ClnfMultiPie,
    /// Slowest, most accurate
    #[default]
    CeclmGeneral,
}

impl LandmarkModel {
    pub const ALL: [Self; 6] = [
        Self::ClmGeneral,
        Self::ClmWild,
        Self::ClnfGeneral,
        Self::ClnfWild,
        Self::ClnfMultiPie,
        Self::CeclmGeneral,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ClmGeneral => "clm_general",
            Self::ClmWild => "clm_wild",
            Self::ClnfGeneral => "clnf_general",
            Self::ClnfWild => "clnf_wild",
            Self::ClnfMultiPie => "clnf_multi_pie",
            Self::CeclmGeneral => "ceclm_general",
        }
    }

    #[must_use]
    pub const fn family(self) -> DetectorFamily {
        match self {
            Self::ClmGeneral | Self::ClmWild => DetectorFamily::Clm,
            Self::ClnfGeneral | Self::ClnfWild | Self::ClnfMultiPie => DetectorFamily::Clnf,
            Self::CeclmGeneral => DetectorFamily::Ceclm,
        }
    }

    /// Model file under `model/`
    #[must_use]
    pub fn file_name(self) -> String {
        format!("main_{}.txt", self.name())
    }
}

impl fmt::Display for LandmarkModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LandmarkModel {
    type Err = OpenFaceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|m| m.name()).collect();
                unknown("landmark detector model", s, &names)
            })
    }
}

/// Face detector backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FaceDetectorKind {
    /// OpenCV HAAR cascade; reports no confidence
    Haar,
    /// dlib HOG-SVM; confidence has no upper bound
    HogSvm,
    #[default]
    Mtcnn,
}

impl FaceDetectorKind {
    pub const ALL: [Self; 3] = [Self::Haar, Self::HogSvm, Self::Mtcnn];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Haar => "haar",
            Self::HogSvm => "hog",
            Self::Mtcnn => "mtcnn",
        }
    }

    /// Whether the native result starts with a confidence value
    #[must_use]
    pub const fn reports_confidence(self) -> bool {
        match self {
            Self::Haar => false,
            Self::HogSvm | Self::Mtcnn => true,
        }
    }
}

impl fmt::Display for FaceDetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FaceDetectorKind {
    type Err = OpenFaceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|d| d.name()).collect();
                unknown("face detector", s, &names)
            })
    }
}

fn unknown(what: &str, value: &str, names: &[&str]) -> OpenFaceError {
    let hint = suggest(value, names)
        .map(|n| format!(" Did you mean '{n}'?"))
        .unwrap_or_default();
    OpenFaceError::Config(format!(
        "Unknown {what} '{value}'.{hint} Must be one of: {}",
        names.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_model_round_trip_names() {
        for model in LandmarkModel::ALL {
            assert_eq!(model.name().parse::<LandmarkModel>().unwrap(), model);
        }
    }

    #[test]
    fn test_families() {
        assert_eq!(LandmarkModel::ClmWild.family(), DetectorFamily::Clm);
        assert_eq!(LandmarkModel::ClnfMultiPie.family(), DetectorFamily::Clnf);
        assert_eq!(LandmarkModel::CeclmGeneral.family(), DetectorFamily::Ceclm);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(LandmarkModel::default(), LandmarkModel::CeclmGeneral);
        assert_eq!(FaceDetectorKind::default(), FaceDetectorKind::Mtcnn);
    }

    #[test]
    fn test_file_name() {
        assert_eq!(LandmarkModel::ClnfWild.file_name(), "main_clnf_wild.txt");
    }

    #[test]
    fn test_unknown_model() {
        let err = "nonexistent_model".parse::<LandmarkModel>().unwrap_err();
        assert!(matches!(err, OpenFaceError::Config(_)));
        let msg = err.to_string();
        assert!(msg.contains("nonexistent_model"));
        assert!(!msg.contains("Did you mean"));
    }

    #[test]
    fn test_unknown_model_suggests() {
        let err = "clnf_wilde".parse::<LandmarkModel>().unwrap_err();
        assert!(err.to_string().contains("Did you mean 'clnf_wild'?"));
    }

    #[test]
    fn test_face_detector_parse() {
        assert_eq!("haar".parse::<FaceDetectorKind>().unwrap(), FaceDetectorKind::Haar);
        assert_eq!("hog".parse::<FaceDetectorKind>().unwrap(), FaceDetectorKind::HogSvm);
        let err = "dnn".parse::<FaceDetectorKind>().unwrap_err();
        assert!(err.to_string().contains("'dnn'"));
    }

    #[test]
    fn test_confidence_reporting() {
        assert!(!FaceDetectorKind::Haar.reports_confidence());
        assert!(FaceDetectorKind::HogSvm.reports_confidence());
        assert!(FaceDetectorKind::Mtcnn.reports_confidence());
    }
}
