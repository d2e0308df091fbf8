use crate::stream::Classification;
use std::fmt;
use std::path::Path;

/// Why a file ends without a planned remux.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Extension is not in the eligible input set; not an error.
    ExtensionNotEligible(String),
    ProbeFailure(String),
    /// No output extension is configured.
    EmptyTargetExtension,
    NoMatchingCodec,
    AlreadyInTargetContainer(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtensionNotEligible(ext) => {
                write!(f, "extension '{}' is not eligible for testing", ext)
            }
            Self::ProbeFailure(message) => write!(f, "probe failed: {}", message),
            Self::EmptyTargetExtension => write!(f, "no output extension configured"),
            Self::NoMatchingCodec => write!(f, "no stream matched the codec allow-list"),
            Self::AlreadyInTargetContainer(ext) => {
                write!(f, "file is already in the '{}' container", ext)
            }
        }
    }
}

/// Lower-cases an extension and strips leading dots and surrounding blanks.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Normalized extension of `path`, empty when there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| normalize_extension(&ext.to_string_lossy()))
        .unwrap_or_default()
}

/// True when a matched file has to move to a different container.
pub fn decide(matched: bool, current_ext: &str, output_ext: &str) -> bool {
    let output_ext = normalize_extension(output_ext);
    matched && !output_ext.is_empty() && normalize_extension(current_ext) != output_ext
}

/// Verdict for one file, recomputed on every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDecision {
    pub codec_found: bool,
    pub needs_remux: bool,
}

impl MappingDecision {
    pub fn evaluate(classification: &Classification, current_ext: &str, output_ext: &str) -> Self {
        let codec_found = classification.matched();
        Self {
            codec_found,
            needs_remux: decide(codec_found, current_ext, output_ext),
        }
    }

    /// The reason behind a negative verdict, `None` when a remux is planned.
    pub fn skip_reason(&self, current_ext: &str, output_ext: &str) -> Option<SkipReason> {
        if self.needs_remux {
            None
        } else if normalize_extension(output_ext).is_empty() {
            Some(SkipReason::EmptyTargetExtension)
        } else if !self.codec_found {
            Some(SkipReason::NoMatchingCodec)
        } else {
            Some(SkipReason::AlreadyInTargetContainer(normalize_extension(
                current_ext,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_extension_is_a_no_op() {
        assert!(!decide(true, "mkv", "mkv"));
        assert!(!decide(true, ".MKV", "mkv"));
    }

    #[test]
    fn test_different_extension_needs_remux() {
        assert!(decide(true, "avi", "mkv"));
        assert!(decide(true, ".avi", ".mkv"));
    }

    #[test]
    fn test_empty_target_never_remuxes() {
        assert!(!decide(true, "avi", ""));
        assert!(!decide(true, "avi", " . "));
    }

    #[test]
    fn test_unmatched_never_remuxes() {
        assert!(!decide(false, "avi", "mkv"));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of(Path::new("/a/Movie.AVI")), "avi");
        assert_eq!(extension_of(Path::new("/a/movie")), "");
        assert_eq!(extension_of(Path::new("/a.b/movie")), "");
    }

    #[test]
    fn test_skip_reasons() {
        let matched = Classification {
            matched_indices: vec![1],
        };
        let unmatched = Classification::default();

        let decision = MappingDecision::evaluate(&matched, "mkv", "mkv");
        assert_eq!(
            decision.skip_reason("mkv", "mkv"),
            Some(SkipReason::AlreadyInTargetContainer("mkv".to_string()))
        );

        let decision = MappingDecision::evaluate(&unmatched, "avi", "mkv");
        assert_eq!(
            decision.skip_reason("avi", "mkv"),
            Some(SkipReason::NoMatchingCodec)
        );

        let decision = MappingDecision::evaluate(&matched, "avi", "");
        assert_eq!(
            decision.skip_reason("avi", ""),
            Some(SkipReason::EmptyTargetExtension)
        );

        let decision = MappingDecision::evaluate(&matched, "avi", "mkv");
        assert!(decision.needs_remux);
        assert_eq!(decision.skip_reason("avi", "mkv"), None);
    }
}
