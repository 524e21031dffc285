use std::sync::Arc;

use super::models::{CandidateFile, FileEntry, IdentityKey};

/// Ordered collection of accepted files.
///
/// Values are immutable: every operation returns a new `WorkingSet` and a
/// published one is never changed, so a caller can compare snapshots with
/// [`WorkingSet::same_as`] to detect changes.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    entries: Arc<Vec<FileEntry>>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_batch(&self, accepted: Vec<CandidateFile>) -> WorkingSet {
        if accepted.is_empty() {
            return self.clone();
        }

        let mut entries = Vec::with_capacity(self.entries.len() + accepted.len());
        entries.extend(self.entries.iter().cloned());
        entries.extend(accepted.into_iter().map(FileEntry::from));

        Self {
            entries: Arc::new(entries),
        }
    }

    /// Removing an absent key returns an unchanged set.
    pub fn remove(&self, key: &IdentityKey) -> WorkingSet {
        if !self.contains(key) {
            return self.clone();
        }

        let entries = self
            .entries
            .iter()
            .filter(|entry| entry.identity_key != *key)
            .cloned()
            .collect();

        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn clear(&self) -> WorkingSet {
        WorkingSet::new()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&FileEntry> {
        self.entries.iter().find(|entry| entry.identity_key == *key)
    }

    pub fn contains(&self, key: &IdentityKey) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> Vec<IdentityKey> {
        self.entries.iter().map(|entry| entry.identity_key).collect()
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|entry| entry.size_bytes).sum()
    }

    /// True when both values are the same published snapshot.
    pub fn same_as(&self, other: &WorkingSet) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl<'a> IntoIterator for &'a WorkingSet {
    type Item = &'a FileEntry;
    type IntoIter = std::slice::Iter<'a, FileEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
