//! Widget root: mount/unmount lifecycle and the intent interface.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::UploaderConfig;
use crate::dragdrop::{DragDropController, DragEvent, DragState, DropSurface, EventDisposition};
use crate::error::{Result, UploaderError};
use crate::files::{format_megabytes, BatchOutcome, CandidateFile, FileManager, FileValidator, IdentityKey};
use crate::native::{NativeInput, NativeInputSynchronizer};
use crate::picker::PickerAdapter;
use crate::preview::{DisplayHandle, PreviewBackend, PreviewLifecycle};
use crate::view::{ItemView, PickerView, UploaderView};

/// User and platform events the widget reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UploaderIntent {
    Pick { files: Vec<CandidateFile> },
    DragEnter { has_files: bool },
    DragOver,
    DragLeave,
    /// The platform broke off the drag without a leave or drop.
    DragCancel,
    Drop { files: Vec<CandidateFile> },
    Delete { key: IdentityKey },
    Reset,
    DismissRejection,
    PreviewLoaded { handle: DisplayHandle },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DispatchOutcome {
    Batch(BatchOutcome),
    Drag(EventDisposition),
    Removed { removed: bool },
    Reset,
    Dismissed { was_rejected: bool },
    PreviewReleased { released: bool },
}

pub struct Uploader {
    config: UploaderConfig,
    manager: FileManager,
    drag: DragDropController,
    surface: Box<dyn DropSurface>,
    previews: PreviewLifecycle,
    picker: PickerAdapter,
    mounted: bool,
}

impl Uploader {
    /// Builds the widget-scoped collaborators, attaches drag listeners and
    /// publishes the initial empty payload.
    pub fn mount(
        config: UploaderConfig,
        input: Box<dyn NativeInput>,
        mut surface: Box<dyn DropSurface>,
        preview_backend: Box<dyn PreviewBackend>,
    ) -> Result<Self> {
        let accept = config
            .accept_range()
            .map_err(|_| UploaderError::InvalidAcceptRange(config.picker.accept.clone()))?;

        let synchronizer = NativeInputSynchronizer::new(input, config.sync.strict);
        let mut manager = FileManager::new(FileValidator::new(&accept), synchronizer);
        manager.resync()?;

        let mut drag = DragDropController::new();
        drag.activate(surface.as_mut());

        let picker = PickerAdapter::new(&config.picker);

        info!(accept = %accept, strict_sync = config.sync.strict, "Uploader mounted");

        Ok(Self {
            config,
            manager,
            drag,
            surface,
            previews: PreviewLifecycle::new(preview_backend),
            picker,
            mounted: true,
        })
    }

    pub fn dispatch(&mut self, intent: UploaderIntent) -> Result<DispatchOutcome> {
        if !self.mounted {
            return Err(UploaderError::NotMounted);
        }

        match intent {
            UploaderIntent::Pick { files } => {
                let outcome = self.picker.files_chosen(files, &mut self.manager)?;
                Ok(DispatchOutcome::Batch(outcome))
            }
            UploaderIntent::DragEnter { has_files } => self.drag_event(DragEvent::Enter { has_files }),
            UploaderIntent::DragOver => self.drag_event(DragEvent::Over),
            UploaderIntent::DragLeave => self.drag_event(DragEvent::Leave),
            UploaderIntent::Drop { files } => self.drag_event(DragEvent::Drop { files }),
            UploaderIntent::DragCancel => {
                self.drag.reset();
                Ok(DispatchOutcome::Drag(EventDisposition {
                    default_prevented: false,
                    state: self.drag.state(),
                    outcome: None,
                }))
            }
            UploaderIntent::Delete { key } => {
                let removed = self.manager.remove(&key)?;
                self.previews.forget(&key);
                Ok(DispatchOutcome::Removed { removed })
            }
            UploaderIntent::Reset => {
                self.manager.clear()?;
                self.previews.release_all();
                self.picker.reset_selection(&mut self.manager)?;
                Ok(DispatchOutcome::Reset)
            }
            UploaderIntent::DismissRejection => {
                let was_rejected = self.manager.acknowledge_rejection();
                Ok(DispatchOutcome::Dismissed { was_rejected })
            }
            UploaderIntent::PreviewLoaded { handle } => {
                let released = self.previews.on_loaded(&handle);
                Ok(DispatchOutcome::PreviewReleased { released })
            }
        }
    }

    fn drag_event(&mut self, event: DragEvent) -> Result<DispatchOutcome> {
        let disposition = self.drag.handle(event, &mut self.manager)?;
        Ok(DispatchOutcome::Drag(disposition))
    }

    /// Snapshot for rendering. Acquires preview handles for items that
    /// have not loaded yet.
    pub fn view(&mut self) -> UploaderView {
        let precision = self.config.display.size_precision;
        let working_set = self.manager.working_set().clone();

        let items: Vec<ItemView> = working_set
            .iter()
            .map(|entry| ItemView {
                key: entry.identity_key,
                name: entry.name.clone(),
                size_label: entry.size_label(precision),
                preview: (self.mounted && !self.previews.is_loaded(&entry.identity_key))
                    .then(|| self.previews.acquire(entry)),
            })
            .collect();

        let rejection = self.manager.rejection().pending().cloned();

        UploaderView {
            empty_message: items
                .is_empty()
                .then(|| self.config.display.empty_message.clone()),
            items,
            total_size_label: format_megabytes(working_set.total_bytes(), precision),
            hovering: self.drag.state() == DragState::Hovering,
            rejected: rejection.is_some(),
            interactive: rejection.is_none(),
            rejection,
            picker: PickerView {
                accept: self.picker.accept().to_string(),
                multiple: self.picker.multiple(),
            },
        }
    }

    /// Detaches listeners, releases previews and the native input. Safe to
    /// call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }

        self.drag.deactivate(self.surface.as_mut());
        self.previews.release_all();
        self.manager.teardown();
        self.mounted = false;
        info!("Uploader unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn manager(&self) -> &FileManager {
        &self.manager
    }

    pub fn previews(&self) -> &PreviewLifecycle {
        &self.previews
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }
}

impl Drop for Uploader {
    fn drop(&mut self) {
        if self.mounted {
            debug!("Uploader dropped while mounted");
            self.unmount();
        }
    }
}

impl std::fmt::Debug for Uploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uploader")
            .field("mounted", &self.mounted)
            .field("manager", &self.manager)
            .field("drag", &self.drag)
            .field("previews", &self.previews)
            .finish()
    }
}
