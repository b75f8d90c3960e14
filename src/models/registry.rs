/// A large CEN patch file hosted outside the source repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSource {
    pub tag: &'static str,
    pub primary: &'static str,
    pub backup: &'static str,
}

/// Registry of CEN patch files, in installation order
pub const PATCHES: &[PatchSource] = &[
    PatchSource {
        tag: "0.25",
        primary: "https://www.dropbox.com/s/7na5qsjzz8yfoer/cen_patches_0.25_of.dat?dl=1",
        backup: "https://onedrive.live.com/download?cid=2E2ADA578BFF6E6E&resid=2E2ADA578BFF6E6E%2153072&authkey=AKqoZtcN0PSIZH4",
    },
    PatchSource {
        tag: "0.35",
        primary: "https://www.dropbox.com/s/k7bj804cyiu474t/cen_patches_0.35_of.dat?dl=1",
        backup: "https://onedrive.live.com/download?cid=2E2ADA578BFF6E6E&resid=2E2ADA578BFF6E6E%2153079&authkey=ANpDR1n3ckL_0gs",
    },
    PatchSource {
        tag: "0.50",
        primary: "https://www.dropbox.com/s/ixt4vkbmxgab1iu/cen_patches_0.50_of.dat?dl=1",
        backup: "https://onedrive.live.com/download?cid=2E2ADA578BFF6E6E&resid=2E2ADA578BFF6E6E%2153074&authkey=AGi-e30AfRc_zvs",
    },
    PatchSource {
        tag: "1.00",
        primary: "https://www.dropbox.com/s/2t5t1sdpshzfhpj/cen_patches_1.00_of.dat?dl=1",
        backup: "https://onedrive.live.com/download?cid=2E2ADA578BFF6E6E&resid=2E2ADA578BFF6E6E%2153070&authkey=AD6KjtYipphwBPc",
    },
];

impl PatchSource {
    /// Find patch by size tag
    #[must_use]
    pub fn find(tag: &str) -> Option<&'static Self> {
        PATCHES.iter().find(|p| p.tag == tag)
    }

    /// Get all size tags, in installation order
    #[must_use]
    pub fn all_tags() -> Vec<&'static str> {
        PATCHES.iter().map(|p| p.tag).collect()
    }

    /// File name the patch is stored under
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("cen_patches_{}_of.dat", self.tag)
    }
}

/// Find the closest candidate using Levenshtein distance
#[must_use]
pub fn suggest<'a>(name: &str, candidates: &[&'a str]) -> Option<&'a str> {
    if name.is_empty() {
        return None;
    }

    candidates
        .iter()
        .map(|c| (*c, levenshtein_distance(name, c)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2) // Only suggest if within 2 edits
        .map(|(candidate, _)| candidate)
}

/// Calculate Levenshtein distance between two strings
#[allow(clippy::needless_range_loop)]
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    for i in 0..=len1 {
        matrix[i][0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for (i, c1) in s1.chars().enumerate() {
        for (j, c2) in s2.chars().enumerate() {
            let cost = usize::from(c1 != c2);
            matrix[i + 1][j + 1] = (matrix[i][j + 1] + 1)
                .min(matrix[i + 1][j] + 1)
                .min(matrix[i][j] + cost);
        }
    }

    matrix[len1][len2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_sequence() {
        assert_eq!(PatchSource::all_tags(), vec!["0.25", "0.35", "0.50", "1.00"]);
    }

    #[test]
    fn test_find_patch() {
        let patch = PatchSource::find("0.50").unwrap();
        assert_eq!(patch.file_name(), "cen_patches_0.50_of.dat");
        assert!(patch.primary.contains("cen_patches_0.50_of.dat"));
        assert!(patch.backup.starts_with("https://onedrive.live.com/"));
        assert!(PatchSource::find("0.5").is_none());
    }

    #[test]
    fn test_every_patch_has_distinct_sources() {
        for patch in PATCHES {
            assert_ne!(patch.primary, patch.backup, "{}", patch.tag);
        }
    }

    #[test]
    fn test_suggest() {
        let names = ["clnf_general", "clnf_wild", "ceclm_general"];
        assert_eq!(suggest("clnf_generl", &names), Some("clnf_general"));
        assert_eq!(suggest("clnf_wilde", &names), Some("clnf_wild"));
        assert_eq!(suggest("nonexistent_model", &names), None);
        assert_eq!(suggest("", &names), None);
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("hog", "hog"), 0);
        assert_eq!(levenshtein_distance("haar", "har"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }
}
