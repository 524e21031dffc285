use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploaderConfig {
    pub picker: PickerConfig,
    pub sync: SyncConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Media range offered to the native picker and enforced on every batch.
    pub accept: String,
    pub multiple: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Report a detached native input as an error instead of logging it.
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub size_precision: usize,
    pub empty_message: String,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            picker: PickerConfig::default(),
            sync: SyncConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            accept: mime::IMAGE_STAR.to_string(),
            multiple: true,
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            strict: cfg!(debug_assertions),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            size_precision: 1,
            empty_message: "No Image".to_string(),
        }
    }
}

impl UploaderConfig {
    /// Defaults, then `uploader.toml` in the working directory if present,
    /// then `UPLOADER__SECTION__FIELD` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let local = Path::new("uploader.toml");
        Self::build(local.exists().then_some(local))
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()))
    }

    fn build(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&UploaderConfig::default())?);

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("UPLOADER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let uploader_config: UploaderConfig = config.try_deserialize()?;

        uploader_config.validate()?;

        Ok(uploader_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.accept_range()?;

        if self.display.size_precision > 3 {
            return Err(ConfigError::Message(
                "Size precision must be at most 3 decimal places".to_string(),
            ));
        }

        if self.display.empty_message.trim().is_empty() {
            return Err(ConfigError::Message(
                "Empty message cannot be blank".to_string(),
            ));
        }

        if !self.sync.strict && cfg!(debug_assertions) {
            tracing::warn!("Lenient sync enabled in a debug build - detached inputs will only be logged");
        }

        Ok(())
    }

    pub fn accept_range(&self) -> Result<mime::Mime, ConfigError> {
        self.picker.accept.parse::<mime::Mime>().map_err(|e| {
            ConfigError::Message(format!(
                "Accept range '{}' is not a media type: {}",
                self.picker.accept, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = UploaderConfig::default();
        assert_eq!(config.picker.accept, "image/*");
        assert!(config.picker.multiple);
        assert_eq!(config.display.size_precision, 1);
        assert_eq!(config.display.empty_message, "No Image");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = UploaderConfig::default();

        config.picker.accept = "not a media type".to_string();
        assert!(config.validate().is_err());

        config = UploaderConfig::default();
        config.display.size_precision = 7;
        assert!(config.validate().is_err());

        config = UploaderConfig::default();
        config.display.empty_message = "   ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_accept_range() {
        let config = UploaderConfig::default();
        let range = config.accept_range().unwrap();
        assert_eq!(range.type_(), mime::IMAGE);
        assert_eq!(range.subtype(), mime::STAR);
    }

    #[test]
    fn test_config_loading_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[picker]
accept = "image/png"
multiple = false

[display]
size_precision = 2
empty_message = "Nothing selected"
"#
        )
        .unwrap();

        let config = UploaderConfig::load_from(file.path()).expect("Should load file configuration");

        assert_eq!(config.picker.accept, "image/png");
        assert!(!config.picker.multiple);
        assert_eq!(config.display.size_precision, 2);
        assert_eq!(config.display.empty_message, "Nothing selected");
        assert_eq!(config.sync.strict, cfg!(debug_assertions));
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[picker]\naccept = \"images\"\nmultiple = true").unwrap();

        assert!(UploaderConfig::load_from(file.path()).is_err());
    }
}
