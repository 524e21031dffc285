pub mod controller;
pub mod surface;

pub use controller::{DragDropController, DragEvent, DragState, EventDisposition};
pub use surface::{DragEventKind, DropSurface, ListenerId, MemorySurface};
