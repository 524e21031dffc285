//! Core library for the image uploader widget: working-set management,
//! batch validation, native input mirroring, drag-and-drop and previews.

pub mod config;
pub mod dragdrop;
pub mod error;
pub mod files;
pub mod native;
pub mod picker;
pub mod preview;
pub mod view;
pub mod widget;

pub use config::UploaderConfig;
pub use dragdrop::{DragDropController, DragEvent, DragEventKind, DragState, DropSurface, EventDisposition, MemorySurface};
pub use error::{Result, UploaderError};
pub use files::{
    BatchOutcome, BatchSource, CandidateFile, FileEntry, FileManager, FileValidator, IdentityKey,
    RawHandle, Rejection, RejectionState, WorkingSet,
};
pub use native::{MemoryInput, NativeInput, NativeInputSynchronizer};
pub use picker::PickerAdapter;
pub use preview::{DisplayHandle, MemoryPreviewBackend, PreviewBackend, PreviewLifecycle};
pub use view::{ItemView, PickerView, UploaderView};
pub use widget::{DispatchOutcome, Uploader, UploaderIntent};

/// Mounts an uploader against the headless adapters and returns them
/// alongside it, so callers can observe what the widget wrote.
pub fn mount_headless(
    config: UploaderConfig,
) -> Result<(Uploader, MemoryInput, MemorySurface, MemoryPreviewBackend)> {
    let input = MemoryInput::new();
    let surface = MemorySurface::new();
    let previews = MemoryPreviewBackend::new();

    let uploader = Uploader::mount(
        config,
        Box::new(input.clone()),
        Box::new(surface.clone()),
        Box::new(previews.clone()),
    )?;

    Ok((uploader, input, surface, previews))
}
