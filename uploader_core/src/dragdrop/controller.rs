use serde::{Deserialize, Serialize};
use tracing::debug;

use super::surface::{DragEventKind, DropSurface, ListenerId};
use crate::error::Result;
use crate::files::{BatchOutcome, BatchSource, CandidateFile, FileManager};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Hovering,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Enter { has_files: bool },
    Over,
    Leave,
    Drop { files: Vec<CandidateFile> },
}

impl DragEvent {
    pub fn kind(&self) -> DragEventKind {
        match self {
            DragEvent::Enter { .. } => DragEventKind::Enter,
            DragEvent::Over => DragEventKind::Over,
            DragEvent::Leave => DragEventKind::Leave,
            DragEvent::Drop { .. } => DragEventKind::Drop,
        }
    }
}

/// What the platform should do with the event after the controller saw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDisposition {
    /// The platform must not open or navigate to the dragged file.
    pub default_prevented: bool,
    pub state: DragState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<BatchOutcome>,
}

/// Idle/hovering state machine for the drop surface.
///
/// Listeners for all four event kinds are attached by [`activate`] and
/// removed by [`deactivate`]; while inactive, events are ignored and the
/// platform default is left alone.
///
/// [`activate`]: DragDropController::activate
/// [`deactivate`]: DragDropController::deactivate
#[derive(Debug, Default)]
pub struct DragDropController {
    state: DragState,
    listeners: Vec<ListenerId>,
}

impl DragDropController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, surface: &mut dyn DropSurface) {
        if self.is_active() {
            return;
        }

        self.listeners = DragEventKind::ALL
            .iter()
            .map(|kind| surface.add_listener(*kind))
            .collect();
        self.state = DragState::Idle;
        debug!(listeners = self.listeners.len(), "Drag listeners attached");
    }

    pub fn deactivate(&mut self, surface: &mut dyn DropSurface) {
        let detached = self
            .listeners
            .drain(..)
            .filter(|id| surface.remove_listener(*id))
            .count();
        self.state = DragState::Idle;
        debug!(detached, "Drag listeners detached");
    }

    pub fn is_active(&self) -> bool {
        !self.listeners.is_empty()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Drops back to idle after an event stream the platform broke off.
    pub fn reset(&mut self) {
        if self.state != DragState::Idle {
            debug!("Drag state reset");
        }
        self.state = DragState::Idle;
    }

    pub fn handle(&mut self, event: DragEvent, manager: &mut FileManager) -> Result<EventDisposition> {
        if !self.is_active() {
            debug!(kind = ?event.kind(), "Drag event ignored by inactive controller");
            return Ok(EventDisposition {
                default_prevented: false,
                state: self.state,
                outcome: None,
            });
        }

        let previous = self.state;
        let mut outcome = None;

        match event {
            DragEvent::Enter { has_files: true } => self.state = DragState::Hovering,
            DragEvent::Enter { has_files: false } | DragEvent::Over => {}
            DragEvent::Leave => self.state = DragState::Idle,
            DragEvent::Drop { files } => {
                // Idle first so a failed sync cannot leave the surface highlighted.
                self.state = DragState::Idle;
                outcome = Some(manager.submit_batch(BatchSource::Drop, files)?);
            }
        }

        if previous != self.state {
            debug!(from = ?previous, to = ?self.state, "Drag state changed");
        }

        Ok(EventDisposition {
            default_prevented: true,
            state: self.state,
            outcome,
        })
    }
}
