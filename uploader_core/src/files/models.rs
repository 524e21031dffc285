use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque platform reference to a file's content. The core never reads
/// the bytes behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawHandle(pub u64);

/// Identity of one accepted entry, generated when its batch is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(Uuid);

impl IdentityKey {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for IdentityKey {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A file as reported by the picker or a drop, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFile {
    pub name: String,
    pub size_bytes: u64,
    #[serde(default)]
    pub media_type: String,
    pub last_modified: DateTime<Utc>,
    pub raw_handle: RawHandle,
}

impl CandidateFile {
    pub fn new(
        name: impl Into<String>,
        size_bytes: u64,
        media_type: impl Into<String>,
        raw_handle: RawHandle,
    ) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            media_type: media_type.into(),
            last_modified: Utc::now(),
            raw_handle,
        }
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = last_modified;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    pub identity_key: IdentityKey,
    pub name: String,
    pub size_bytes: u64,
    pub media_type: String,
    pub last_modified: DateTime<Utc>,
    pub raw_handle: RawHandle,
}

impl From<CandidateFile> for FileEntry {
    fn from(candidate: CandidateFile) -> Self {
        Self {
            identity_key: IdentityKey::generate(),
            name: candidate.name,
            size_bytes: candidate.size_bytes,
            media_type: candidate.media_type,
            last_modified: candidate.last_modified,
            raw_handle: candidate.raw_handle,
        }
    }
}

impl FileEntry {
    pub fn size_label(&self, precision: usize) -> String {
        format_megabytes(self.size_bytes, precision)
    }
}

const BYTES_PER_MEGABYTE: f64 = (1u64 << 20) as f64;

/// Formats a byte count as binary megabytes, e.g. `1572864` -> `1.5MB`.
pub fn format_megabytes(size_bytes: u64, precision: usize) -> String {
    format!("{:.*}MB", precision, size_bytes as f64 / BYTES_PER_MEGABYTE)
}
