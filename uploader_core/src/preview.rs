//! Display handles for image previews.
//!
//! A handle is a memory-backed reference (an object URL on the web) that
//! stays allocated until revoked. [`PreviewLifecycle`] creates one per
//! entry on demand and revokes it exactly once, when the preview reports
//! its first successful load, when the entry goes away, or at teardown.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::files::{FileEntry, IdentityKey, RawHandle};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayHandle(String);

impl DisplayHandle {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub trait PreviewBackend {
    fn create_handle(&mut self, raw: RawHandle) -> DisplayHandle;

    fn revoke_handle(&mut self, handle: &DisplayHandle);
}

#[derive(Debug, Default)]
struct BackendState {
    live: HashSet<DisplayHandle>,
    created: u64,
    revoked: u64,
}

/// Headless backend issuing `blob:` style URLs.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreviewBackend {
    state: Arc<RwLock<BackendState>>,
}

impl MemoryPreviewBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.state.read().live.len()
    }

    pub fn is_live(&self, handle: &DisplayHandle) -> bool {
        self.state.read().live.contains(handle)
    }

    pub fn created(&self) -> u64 {
        self.state.read().created
    }

    pub fn revoked(&self) -> u64 {
        self.state.read().revoked
    }
}

impl PreviewBackend for MemoryPreviewBackend {
    fn create_handle(&mut self, raw: RawHandle) -> DisplayHandle {
        let handle = DisplayHandle(format!("blob:uploader/{}/{}", raw.0, Uuid::new_v4()));
        let mut state = self.state.write();
        state.live.insert(handle.clone());
        state.created += 1;
        handle
    }

    fn revoke_handle(&mut self, handle: &DisplayHandle) {
        let mut state = self.state.write();
        if state.live.remove(handle) {
            state.revoked += 1;
        }
    }
}

pub struct PreviewLifecycle {
    backend: Box<dyn PreviewBackend>,
    live: HashMap<IdentityKey, DisplayHandle>,
    owners: HashMap<DisplayHandle, IdentityKey>,
    loaded: HashSet<IdentityKey>,
}

impl PreviewLifecycle {
    pub fn new(backend: Box<dyn PreviewBackend>) -> Self {
        Self {
            backend,
            live: HashMap::new(),
            owners: HashMap::new(),
            loaded: HashSet::new(),
        }
    }

    /// Returns the entry's live handle, creating it on first use.
    pub fn acquire(&mut self, entry: &FileEntry) -> DisplayHandle {
        if let Some(handle) = self.live.get(&entry.identity_key) {
            return handle.clone();
        }

        let handle = self.backend.create_handle(entry.raw_handle);
        self.live.insert(entry.identity_key, handle.clone());
        self.owners.insert(handle.clone(), entry.identity_key);
        debug!(key = %entry.identity_key, handle = handle.as_str(), "Preview handle created");
        handle
    }

    /// Revokes a handle. Returns false if it was already released.
    pub fn release(&mut self, handle: &DisplayHandle) -> bool {
        let Some(key) = self.owners.remove(handle) else {
            return false;
        };

        self.live.remove(&key);
        self.backend.revoke_handle(handle);
        debug!(%key, handle = handle.as_str(), "Preview handle released");
        true
    }

    /// First-load signal from the rendered preview.
    pub fn on_loaded(&mut self, handle: &DisplayHandle) -> bool {
        let key = self.owners.get(handle).copied();
        if !self.release(handle) {
            debug!(handle = handle.as_str(), "Load signal for a released handle ignored");
            return false;
        }

        if let Some(key) = key {
            self.loaded.insert(key);
        }
        true
    }

    /// Drops everything held for an entry that left the working set.
    pub fn forget(&mut self, key: &IdentityKey) {
        if let Some(handle) = self.live.get(key).cloned() {
            self.release(&handle);
        }
        self.loaded.remove(key);
    }

    pub fn release_all(&mut self) {
        let handles: Vec<DisplayHandle> = self.owners.keys().cloned().collect();
        if !handles.is_empty() {
            warn!(count = handles.len(), "Releasing previews that never finished loading");
        }

        for handle in handles {
            self.release(&handle);
        }
        self.loaded.clear();
    }

    /// True once the entry's preview has loaded and no longer needs a handle.
    pub fn is_loaded(&self, key: &IdentityKey) -> bool {
        self.loaded.contains(key)
    }

    pub fn handle_for(&self, key: &IdentityKey) -> Option<&DisplayHandle> {
        self.live.get(key)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl std::fmt::Debug for PreviewLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewLifecycle")
            .field("live", &self.live)
            .field("loaded", &self.loaded)
            .finish()
    }
}
