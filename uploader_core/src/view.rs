//! Render snapshot handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::dragdrop::DragState;
use crate::files::{IdentityKey, Rejection};
use crate::preview::DisplayHandle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub key: IdentityKey,
    pub name: String,
    pub size_label: String,
    /// Present until the preview has loaded once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<DisplayHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerView {
    pub accept: String,
    pub multiple: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploaderView {
    pub items: Vec<ItemView>,
    pub total_size_label: String,
    /// Shown in place of the list when there are no items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
    pub hovering: bool,
    pub rejected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
    /// False while a rejection waits for acknowledgement.
    pub interactive: bool,
    pub picker: PickerView,
}

impl UploaderView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn drag_state(&self) -> DragState {
        if self.hovering {
            DragState::Hovering
        } else {
            DragState::Idle
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
