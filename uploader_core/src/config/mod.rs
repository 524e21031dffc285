pub mod settings;

pub use settings::{DisplayConfig, PickerConfig, SyncConfig, UploaderConfig};
