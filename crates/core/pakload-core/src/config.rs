//! Configuration for the asset loader.
//!
//! The defaults reproduce the original host page contract: an
//! `<input type="file" id="assetFile">` control, a `#status` text element,
//! and the asset pack staged at `/assets.pak`.

use crate::error::{LoaderError, LoaderResult};
use serde::{Deserialize, Serialize};

/// Configuration for a [`Loader`](crate::Loader) instance.
///
/// All fields are optional when deserializing; missing fields fall back to
/// the defaults, so a host page can override only what it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Id of the file-input control the loader binds to
    pub input_element_id: String,
    /// Id of the text element used for status display
    pub status_element_id: String,
    /// Directory inside the module's virtual filesystem the asset is
    /// created under
    pub mount_dir: String,
    /// Name of the virtual file entry
    pub asset_name: String,
    /// Status text shown while a read is in flight
    pub loading_message: String,
    /// Status text shown when a load fails
    pub failure_message: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            input_element_id: "assetFile".to_string(),
            status_element_id: "status".to_string(),
            mount_dir: "/".to_string(),
            asset_name: "assets.pak".to_string(),
            loading_message: "Loading assets...".to_string(),
            failure_message: "Failed to load assets".to_string(),
        }
    }
}

impl LoaderConfig {
    /// Validate this configuration
    pub fn validate(&self) -> LoaderResult<()> {
        if self.input_element_id.is_empty() {
            return Err(LoaderError::config("input element id must not be empty"));
        }
        if self.status_element_id.is_empty() {
            return Err(LoaderError::config("status element id must not be empty"));
        }
        if !self.mount_dir.starts_with('/') {
            return Err(LoaderError::config(format!(
                "mount dir must be absolute, got '{}'",
                self.mount_dir
            )));
        }
        if self.asset_name.is_empty() {
            return Err(LoaderError::config("asset name must not be empty"));
        }
        if self.asset_name.contains('/') {
            return Err(LoaderError::config(format!(
                "asset name must not contain path separators, got '{}'",
                self.asset_name
            )));
        }
        Ok(())
    }

    /// Check if this configuration is valid
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_contract() {
        let config = LoaderConfig::default();
        assert_eq!(config.input_element_id, "assetFile");
        assert_eq!(config.status_element_id, "status");
        assert_eq!(config.mount_dir, "/");
        assert_eq!(config.asset_name, "assets.pak");
        assert_eq!(config.loading_message, "Loading assets...");
        assert!(config.is_valid());
    }

    #[test]
    fn test_validation_rejects_empty_ids() {
        let config = LoaderConfig {
            input_element_id: String::new(),
            ..LoaderConfig::default()
        };
        assert!(config.validate().is_err());

        let config = LoaderConfig {
            status_element_id: String::new(),
            ..LoaderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_relative_mount_dir() {
        let config = LoaderConfig {
            mount_dir: "assets".to_string(),
            ..LoaderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_separators_in_asset_name() {
        let config = LoaderConfig {
            asset_name: "data/assets.pak".to_string(),
            ..LoaderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let config: LoaderConfig =
            serde_json::from_str(r#"{"asset_name": "level1.pak"}"#).unwrap();
        assert_eq!(config.asset_name, "level1.pak");
        assert_eq!(config.input_element_id, "assetFile");
        assert_eq!(config.loading_message, "Loading assets...");
    }
}
