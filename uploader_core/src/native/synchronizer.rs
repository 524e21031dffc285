use tracing::{debug, error};

use super::input::NativeInput;
use crate::error::{Result, UploaderError};
use crate::files::{RawHandle, WorkingSet};

/// Widget-scoped writer of the native input payload.
///
/// One instance lives from mount to unmount and is the only code that
/// writes the control. Each sync rebuilds the payload from scratch in a
/// reused buffer, since the control cannot drop individual files.
pub struct NativeInputSynchronizer {
    input: Option<Box<dyn NativeInput>>,
    payload: Vec<RawHandle>,
    strict: bool,
    syncs: u64,
}

impl NativeInputSynchronizer {
    pub fn new(input: Box<dyn NativeInput>, strict: bool) -> Self {
        Self {
            input: Some(input),
            payload: Vec::new(),
            strict,
            syncs: 0,
        }
    }

    pub fn sync(&mut self, working_set: &WorkingSet) -> Result<()> {
        if !self.is_attached() {
            return self.report_detached("sync", working_set.len());
        }

        self.payload.clear();
        self.payload
            .extend(working_set.iter().map(|entry| entry.raw_handle));

        if let Some(input) = self.input.as_mut() {
            input.set_files(&self.payload);
        }
        self.syncs += 1;

        debug!(files = self.payload.len(), syncs = self.syncs, "Native input synchronized");
        Ok(())
    }

    pub fn reset_value(&mut self) -> Result<()> {
        if !self.is_attached() {
            return self.report_detached("reset_value", self.payload.len());
        }

        if let Some(input) = self.input.as_mut() {
            input.clear_value();
        }
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.input.as_ref().map_or(false, |input| input.is_attached())
    }

    /// Releases the control at unmount. Later syncs report a failure.
    pub fn detach(&mut self) {
        if self.input.take().is_some() {
            debug!("Native input detached");
        }
        self.payload.clear();
    }

    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    pub fn sync_count(&self) -> u64 {
        self.syncs
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn report_detached(&self, operation: &str, entries: usize) -> Result<()> {
        error!(
            operation,
            entries,
            strict = self.strict,
            "Native input unavailable - payload no longer matches the working set"
        );

        if self.strict {
            Err(UploaderError::InputDetached { entries })
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Debug for NativeInputSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeInputSynchronizer")
            .field("attached", &self.is_attached())
            .field("payload", &self.payload)
            .field("strict", &self.strict)
            .field("syncs", &self.syncs)
            .finish()
    }
}
