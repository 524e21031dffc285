use std::sync::Arc;
use parking_lot::RwLock;

use crate::files::RawHandle;

/// The platform's native file-input control.
///
/// The control only accepts a whole payload at a time; there is no
/// primitive for removing a single file from it.
pub trait NativeInput {
    /// False once the control has been removed from its form.
    fn is_attached(&self) -> bool;

    fn set_files(&mut self, files: &[RawHandle]);

    fn files(&self) -> Vec<RawHandle>;

    /// Clears the control's displayed value so choosing the same file
    /// again fires a change signal.
    fn clear_value(&mut self);
}

#[derive(Debug, Default)]
struct MemoryInputState {
    files: Vec<RawHandle>,
    value: String,
    attached: bool,
    writes: u64,
}

/// Headless native input. Clones share the same control, so a test can
/// keep one handle while the synchronizer owns another.
#[derive(Debug, Clone)]
pub struct MemoryInput {
    state: Arc<RwLock<MemoryInputState>>,
}

impl MemoryInput {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryInputState {
                attached: true,
                ..Default::default()
            })),
        }
    }

    /// Simulates the control being torn out of the page.
    pub fn detach(&self) {
        self.state.write().attached = false;
    }

    /// Simulates the user choosing files in the native dialog, which sets
    /// the displayed value.
    pub fn choose(&self, display_value: impl Into<String>) {
        self.state.write().value = display_value.into();
    }

    pub fn value(&self) -> String {
        self.state.read().value.clone()
    }

    pub fn file_count(&self) -> usize {
        self.state.read().files.len()
    }

    /// Number of payload assignments performed so far.
    pub fn writes(&self) -> u64 {
        self.state.read().writes
    }
}

impl Default for MemoryInput {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeInput for MemoryInput {
    fn is_attached(&self) -> bool {
        self.state.read().attached
    }

    fn set_files(&mut self, files: &[RawHandle]) {
        let mut state = self.state.write();
        state.files = files.to_vec();
        state.writes += 1;
    }

    fn files(&self) -> Vec<RawHandle> {
        self.state.read().files.clone()
    }

    fn clear_value(&mut self) {
        self.state.write().value.clear();
    }
}
