use serde::{Deserialize, Serialize};

use super::models::CandidateFile;

/// Why a batch was turned away. The batch itself is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub offending: Vec<String>,
    pub batch_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchVerdict {
    Accepted(Vec<CandidateFile>),
    Rejected(Rejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MediaRule {
    Any,
    Prefix(String),
    Exact(String),
}

/// All-or-nothing media type gate for one batch.
#[derive(Debug, Clone)]
pub struct FileValidator {
    rule: MediaRule,
}

impl FileValidator {
    pub fn new(accept: &mime::Mime) -> Self {
        let rule = if accept.type_() == mime::STAR {
            MediaRule::Any
        } else if accept.subtype() == mime::STAR {
            MediaRule::Prefix(format!("{}/", accept.type_().as_str().to_ascii_lowercase()))
        } else {
            MediaRule::Exact(accept.essence_str().to_ascii_lowercase())
        };

        Self { rule }
    }

    pub fn with_default_config() -> Self {
        Self::new(&mime::IMAGE_STAR)
    }

    pub fn validate(&self, batch: Vec<CandidateFile>) -> BatchVerdict {
        let offending: Vec<String> = batch
            .iter()
            .filter(|candidate| !self.accepts(&candidate.media_type))
            .map(|candidate| candidate.name.clone())
            .collect();

        if offending.is_empty() {
            BatchVerdict::Accepted(batch)
        } else {
            BatchVerdict::Rejected(Rejection {
                offending,
                batch_size: batch.len(),
            })
        }
    }

    pub fn accepts(&self, media_type: &str) -> bool {
        let declared = media_type.trim().to_ascii_lowercase();
        match &self.rule {
            MediaRule::Any => true,
            MediaRule::Prefix(prefix) => declared.starts_with(prefix.as_str()),
            MediaRule::Exact(essence) => {
                declared.split(';').next().map(str::trim) == Some(essence.as_str())
            }
        }
    }
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Whether the widget is accepting new batches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionState {
    pending: Option<Rejection>,
}

impl RejectionState {
    pub fn is_accepted(&self) -> bool {
        self.pending.is_none()
    }

    pub fn pending(&self) -> Option<&Rejection> {
        self.pending.as_ref()
    }

    pub fn raise(&mut self, rejection: Rejection) {
        self.pending = Some(rejection);
    }

    /// Returns false if there was nothing to acknowledge.
    pub fn acknowledge(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::models::RawHandle;

    fn candidate(name: &str, media_type: &str) -> CandidateFile {
        CandidateFile::new(name, 1024, media_type, RawHandle(0))
    }

    #[test]
    fn test_image_batch_is_accepted() {
        let validator = FileValidator::with_default_config();
        let batch = vec![candidate("a.png", "image/png"), candidate("b.jpg", "image/jpeg")];

        assert_eq!(validator.validate(batch.clone()), BatchVerdict::Accepted(batch));
    }

    #[test]
    fn test_one_bad_file_rejects_whole_batch() {
        let validator = FileValidator::with_default_config();
        let batch = vec![
            candidate("image.png", "image/png"),
            candidate("document.pdf", "application/pdf"),
        ];

        match validator.validate(batch) {
            BatchVerdict::Rejected(rejection) => {
                assert_eq!(rejection.offending, vec!["document.pdf".to_string()]);
                assert_eq!(rejection.batch_size, 2);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_media_types() {
        let validator = FileValidator::with_default_config();

        assert!(validator.accepts("image/svg+xml"));
        assert!(validator.accepts("IMAGE/PNG"));

        assert!(!validator.accepts(""));
        assert!(!validator.accepts("application/octet-stream"));
        assert!(!validator.accepts("images/png"));
        assert!(!validator.accepts("text/image"));
    }

    #[test]
    fn test_exact_and_wildcard_ranges() {
        let png_only = FileValidator::new(&mime::IMAGE_PNG);
        assert!(png_only.accepts("image/png"));
        assert!(!png_only.accepts("image/jpeg"));

        let anything = FileValidator::new(&mime::STAR_STAR);
        assert!(anything.accepts("application/pdf"));
        assert!(anything.accepts(""));
    }

    #[test]
    fn test_empty_batch_is_accepted() {
        let validator = FileValidator::with_default_config();
        assert_eq!(validator.validate(Vec::new()), BatchVerdict::Accepted(Vec::new()));
    }

    #[test]
    fn test_rejection_state_acknowledge() {
        let mut state = RejectionState::default();
        assert!(state.is_accepted());
        assert!(!state.acknowledge());

        state.raise(Rejection {
            offending: vec!["doc.pdf".to_string()],
            batch_size: 1,
        });
        assert!(!state.is_accepted());
        assert_eq!(state.pending().map(|r| r.batch_size), Some(1));

        assert!(state.acknowledge());
        assert!(state.is_accepted());
    }
}
