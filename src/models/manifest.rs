use std::path::PathBuf;

/// Raw-file root of the upstream OpenFace repository
pub const REPO_BASE: &str = "https://raw.githubusercontent.com/TadasBaltrusaitis/OpenFace/master/";
/// Repository subpath holding the landmark detector models
pub const MODEL_SUBPATH: &str = "lib/local/LandmarkDetector/";
/// Repository subpath holding the OpenCV HAAR classifier
pub const CLASSIFIER_SUBPATH: &str = "lib/3rdParty/OpenCV/classifiers/";
pub const CLASSIFIER_FILE: &str = "haarcascade_frontalface_alt.xml";

/// Top-level directory the manifest tree is installed under
pub const MODEL_DIR: &str = "model";
pub const CLASSIFIER_DIR: &str = "classifiers";
/// Directory (below `model/`) that receives the CEN patch files
pub const PATCH_DIR: &str = "patch_experts";

/// Approximate disk footprint of a full installation
pub const APPROX_SIZE_MB: u64 = 470;

/// A node of the model-file tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestNode {
    Directory(&'static [Entry]),
    Leaf,
}

/// A named child of a directory node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub name: &'static str,
    pub node: ManifestNode,
}

macro_rules! leaf {
    ($name:literal) => {
        Entry {
            name: $name,
            node: ManifestNode::Leaf,
        }
    };
}

macro_rules! dir {
    ($name:literal, &[$($child:expr),* $(,)?] $(,)?) => {
        Entry {
            name: $name,
            node: ManifestNode::Directory(&[$($child),*]),
        }
    };
}

/// Every file of `lib/local/LandmarkDetector/model`, except the CEN patches
pub static MODEL_FILES: ManifestNode = ManifestNode::Directory(&[
    dir!(
        "detection_validation",
        &[
            leaf!("validator_cnn.txt"),
            leaf!("validator_cnn_68.txt"),
            leaf!("validator_general_68.txt"),
        ],
    ),
    dir!(
        "mtcnn_detector",
        &[
            leaf!("MTCNN_detector.txt"),
            leaf!("ONet.dat"),
            leaf!("PNet.dat"),
            leaf!("RNet.dat"),
        ],
    ),
    dir!(
        "pdms",
        &[
            leaf!("In-the-wild_aligned_PDM_68.txt"),
            leaf!("Multi-PIE_aligned_PDM_68.txt"),
            leaf!("pdm_68_aligned_menpo.txt"),
        ],
    ),
    dir!(
        "patch_experts",
        &[
            leaf!("ccnf_patches_0.25_general.txt"),
            leaf!("ccnf_patches_0.25_wild.txt"),
            leaf!("ccnf_patches_0.25_multi_pie.txt"),
            leaf!("ccnf_patches_0.35_general.txt"),
            leaf!("ccnf_patches_0.35_wild.txt"),
            leaf!("ccnf_patches_0.35_multi_pie.txt"),
            leaf!("ccnf_patches_0.5_general.txt"),
            leaf!("ccnf_patches_0.5_wild.txt"),
            leaf!("ccnf_patches_0.5_multi_pie.txt"),
            leaf!("ccnf_patches_1_wild.txt"),
            leaf!("svr_patches_0.25_general.txt"),
            leaf!("svr_patches_0.25_wild.txt"),
            leaf!("svr_patches_0.35_general.txt"),
            leaf!("svr_patches_0.35_wild.txt"),
            leaf!("svr_patches_0.5_general.txt"),
            leaf!("svr_patches_0.5_wild.txt"),
        ],
    ),
    dir!(
        "model_inner",
        &[
            leaf!("clnf_inner.txt"),
            leaf!("main_clnf_inner.txt"),
            dir!("pdms", &[leaf!("pdm_51_inner.txt")]),
            dir!("patch_experts", &[leaf!("ccnf_patches_1.00_inner.txt")]),
        ],
    ),
    dir!(
        "model_eye",
        &[
            leaf!("clnf_left_synth.txt"),
            leaf!("clnf_right_synth.txt"),
            leaf!("main_clnf_synth_left.txt"),
            leaf!("main_clnf_synth_right.txt"),
            dir!(
                "patch_experts",
                &[
                    leaf!("ccnf_patches_1.00_synth_lid_.txt"),
                    leaf!("ccnf_patches_1.50_synth_lid_.txt"),
                    leaf!("left_ccnf_patches_1.00_synth_lid_.txt"),
                    leaf!("left_ccnf_patches_1.50_synth_lid_.txt"),
                ],
            ),
            dir!(
                "pdms",
                &[
                    leaf!("pdm_28_l_eye_3D_closed.txt"),
                    leaf!("pdm_28_eye_3D_closed.txt"),
                ],
            ),
        ],
    ),
    leaf!("cen_general.txt"),
    leaf!("clm_general.txt"),
    leaf!("clm_wild.txt"),
    leaf!("clnf_general.txt"),
    leaf!("clnf_wild.txt"),
    leaf!("clnf_multi_pie.txt"),
    leaf!("main_ceclm_general.txt"),
    leaf!("main_clm_general.txt"),
    leaf!("main_clm_wild.txt"),
    leaf!("main_clnf_demos.txt"),
    leaf!("main_clnf_general.txt"),
    leaf!("main_clnf_wild.txt"),
    leaf!("main_clnf_multi_pie.txt"),
    leaf!("early_term_cen_of.txt"),
    leaf!("haarAlign.txt"),
    leaf!("tris_68.txt"),
    leaf!("tris_68_full.txt"),
]);

/// A leaf file together with the directory names above it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafFile {
    pub dirs: Vec<&'static str>,
    pub name: &'static str,
}

impl LeafFile {
    /// Path relative to the tree root
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        self.dirs.iter().collect::<PathBuf>().join(self.name)
    }

    /// `/`-joined path used as a URL suffix
    #[must_use]
    pub fn url_suffix(&self) -> String {
        let mut parts = self.dirs.clone();
        parts.push(self.name);
        parts.join("/")
    }
}

impl ManifestNode {
    /// Depth-first list of every leaf below this node
    #[must_use]
    pub fn leaves(&self) -> Vec<LeafFile> {
        let mut out = Vec::new();
        self.collect_leaves(&mut Vec::new(), &mut out);
        out
    }

    fn collect_leaves(&self, path: &mut Vec<&'static str>, out: &mut Vec<LeafFile>) {
        let ManifestNode::Directory(entries) = self else {
            return;
        };

        for entry in *entries {
            match entry.node {
                ManifestNode::Leaf => out.push(LeafFile {
                    dirs: path.clone(),
                    name: entry.name,
                }),
                ManifestNode::Directory(_) => {
                    path.push(entry.name);
                    entry.node.collect_leaves(path, out);
                    path.pop();
                }
            }
        }
    }

    /// Number of leaf files below this node
    #[must_use]
    pub fn file_count(&self) -> usize {
        match self {
            Self::Leaf => 1,
            Self::Directory(entries) => entries.iter().map(|e| e.node.file_count()).sum(),
        }
    }

    /// Deepest directory nesting below this node (a leaf has depth 0)
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf => 0,
            Self::Directory(entries) => {
                1 + entries.iter().map(|e| e.node.depth()).max().unwrap_or(0)
            }
        }
    }
}
