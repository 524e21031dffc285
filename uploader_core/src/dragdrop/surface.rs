use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragEventKind {
    Enter,
    Over,
    Leave,
    Drop,
}

impl DragEventKind {
    pub const ALL: [DragEventKind; 4] = [
        DragEventKind::Enter,
        DragEventKind::Over,
        DragEventKind::Leave,
        DragEventKind::Drop,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Screen region that delivers drag events to registered listeners.
pub trait DropSurface {
    fn add_listener(&mut self, kind: DragEventKind) -> ListenerId;

    /// Returns false if the listener was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

#[derive(Debug, Default)]
struct SurfaceState {
    next_id: u64,
    listeners: HashMap<ListenerId, DragEventKind>,
}

/// Headless drop surface that only records registrations.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    state: Arc<RwLock<SurfaceState>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.state.read().listeners.len()
    }

    pub fn listeners_for(&self, kind: DragEventKind) -> usize {
        self.state
            .read()
            .listeners
            .values()
            .filter(|registered| **registered == kind)
            .count()
    }
}

impl DropSurface for MemorySurface {
    fn add_listener(&mut self, kind: DragEventKind) -> ListenerId {
        let mut state = self.state.write();
        state.next_id += 1;
        let id = ListenerId(state.next_id);
        state.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.state.write().listeners.remove(&id).is_some()
    }
}
