use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::native::NativeInputSynchronizer;
use super::models::{CandidateFile, IdentityKey};
use super::validation::{BatchVerdict, FileValidator, Rejection, RejectionState};
use super::working_set::WorkingSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchSource {
    Picker,
    Drop,
}

impl std::fmt::Display for BatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchSource::Picker => f.write_str("picker"),
            BatchSource::Drop => f.write_str("drop"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchOutcome {
    Accepted { added: usize },
    Rejected(Rejection),
    /// A rejection is still waiting for acknowledgement.
    Suppressed,
    Empty,
}

/// Runs one user action through validate, merge and sync, in that order.
/// A merged snapshot only replaces the current one once its sync succeeded.
#[derive(Debug)]
pub struct FileManager {
    validator: FileValidator,
    working_set: WorkingSet,
    rejection: RejectionState,
    synchronizer: NativeInputSynchronizer,
}

impl FileManager {
    pub fn new(validator: FileValidator, synchronizer: NativeInputSynchronizer) -> Self {
        Self {
            validator,
            working_set: WorkingSet::new(),
            rejection: RejectionState::default(),
            synchronizer,
        }
    }

    pub fn with_default_config(synchronizer: NativeInputSynchronizer) -> Self {
        Self::new(FileValidator::with_default_config(), synchronizer)
    }

    pub fn submit_batch(&mut self, source: BatchSource, batch: Vec<CandidateFile>) -> Result<BatchOutcome> {
        if !self.rejection.is_accepted() {
            debug!(%source, files = batch.len(), "Batch suppressed while a rejection is pending");
            return Ok(BatchOutcome::Suppressed);
        }

        if batch.is_empty() {
            debug!(%source, "Empty batch ignored");
            return Ok(BatchOutcome::Empty);
        }

        match self.validator.validate(batch) {
            BatchVerdict::Accepted(accepted) => {
                let added = accepted.len();
                let next = self.working_set.add_batch(accepted);
                self.synchronizer.sync(&next)?;

                self.working_set = next;
                info!(%source, added, total = self.working_set.len(), "Batch accepted");
                Ok(BatchOutcome::Accepted { added })
            }
            BatchVerdict::Rejected(rejection) => {
                warn!(
                    %source,
                    batch_size = rejection.batch_size,
                    offending = ?rejection.offending,
                    "Batch rejected"
                );
                self.rejection.raise(rejection.clone());
                Ok(BatchOutcome::Rejected(rejection))
            }
        }
    }

    /// Returns false when the key was already gone.
    pub fn remove(&mut self, key: &IdentityKey) -> Result<bool> {
        let next = self.working_set.remove(key);
        if next.same_as(&self.working_set) {
            debug!(%key, "Delete target no longer present");
            return Ok(false);
        }

        self.synchronizer.sync(&next)?;

        self.working_set = next;
        info!(%key, total = self.working_set.len(), "File removed");
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<()> {
        let removed = self.working_set.len();
        let next = self.working_set.clear();
        self.synchronizer.sync(&next)?;

        self.working_set = next;
        info!(removed, "Working set cleared");
        Ok(())
    }

    /// Mirrors the current working set again without changing it.
    pub fn resync(&mut self) -> Result<()> {
        self.synchronizer.sync(&self.working_set)
    }

    /// Returns false if nothing was pending.
    pub fn acknowledge_rejection(&mut self) -> bool {
        let acknowledged = self.rejection.acknowledge();
        if acknowledged {
            info!("Rejection acknowledged");
        }
        acknowledged
    }

    /// Drops the working set without syncing and lets go of the native input.
    pub fn teardown(&mut self) {
        let discarded = self.working_set.len();
        self.working_set = self.working_set.clear();
        self.rejection = RejectionState::default();
        self.synchronizer.detach();
        debug!(discarded, "File manager torn down");
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    pub fn rejection(&self) -> &RejectionState {
        &self.rejection
    }

    pub fn validator(&self) -> &FileValidator {
        &self.validator
    }

    pub fn synchronizer(&self) -> &NativeInputSynchronizer {
        &self.synchronizer
    }

    pub fn synchronizer_mut(&mut self) -> &mut NativeInputSynchronizer {
        &mut self.synchronizer
    }
}
