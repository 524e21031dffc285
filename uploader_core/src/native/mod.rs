//! Mirroring of the working set into the platform's native file input.

pub mod input;
pub mod synchronizer;

pub use input::{MemoryInput, NativeInput};
pub use synchronizer::NativeInputSynchronizer;
