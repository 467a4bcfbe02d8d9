use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::favorites::slot_path;
use crate::repository::ListingSource;

pub const APP_DIR: &str = "listing-browser";
pub const DEFAULT_SOURCE: &str = "./airbnb_sf_listings_500.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: SourceConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL or local path of the JSON array of listings.
    pub location: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the favorites slot; the config directory when unset.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub font_size: f32,
    pub card_width: f32,
    pub window_size: [f32; 2],
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: DEFAULT_SOURCE.to_owned(),
            request_timeout_seconds: 10,
        }
    }
}

impl SourceConfig {
    pub fn source(&self) -> ListingSource {
        ListingSource::parse(&self.location)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            card_width: 320.0,
            window_size: [1100.0, 800.0],
        }
    }
}

/// `~/.config/listing-browser` on Linux; the working directory as a last resort.
pub fn config_dir() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(APP_DIR),
        None => PathBuf::from(".").join(APP_DIR),
    }
}

impl CatalogConfig {
    pub fn config_file_path() -> PathBuf {
        config_dir().join("config.json")
    }

    /// Loads the config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load() -> Self {
        let path = Self::config_file_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!(%err, path = %path.display(), "using default configuration");
                Self::default()
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Sauvegarde la configuration dans le fichier
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::config_file_path())
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.storage.dir.clone().unwrap_or_else(config_dir)
    }

    pub fn favorites_path(&self) -> PathBuf {
        slot_path(self.storage_dir())
    }
}
