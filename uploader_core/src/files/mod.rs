pub mod manager;
pub mod models;
pub mod validation;
pub mod working_set;

pub use manager::{BatchOutcome, BatchSource, FileManager};
pub use models::{format_megabytes, CandidateFile, FileEntry, IdentityKey, RawHandle};
pub use validation::{BatchVerdict, FileValidator, Rejection, RejectionState};
pub use working_set::WorkingSet;
