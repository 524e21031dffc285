use tracing::debug;

use crate::config::PickerConfig;
use crate::error::Result;
use crate::files::{BatchOutcome, BatchSource, CandidateFile, FileManager};

/// Thin bridge between the native file dialog and the manager.
#[derive(Debug, Clone)]
pub struct PickerAdapter {
    accept: String,
    multiple: bool,
}

impl PickerAdapter {
    pub fn new(config: &PickerConfig) -> Self {
        Self {
            accept: config.accept.clone(),
            multiple: config.multiple,
        }
    }

    /// Same path as a dropped batch.
    pub fn files_chosen(&self, files: Vec<CandidateFile>, manager: &mut FileManager) -> Result<BatchOutcome> {
        debug!(files = files.len(), "Files chosen in picker");
        manager.submit_batch(BatchSource::Picker, files)
    }

    /// Clears the control's displayed value so picking the same file again
    /// still produces a change signal.
    pub fn reset_selection(&self, manager: &mut FileManager) -> Result<()> {
        manager.synchronizer_mut().reset_value()
    }

    pub fn accept(&self) -> &str {
        &self.accept
    }

    pub fn multiple(&self) -> bool {
        self.multiple
    }
}
