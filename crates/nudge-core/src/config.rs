//! Nudge configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{NudgeError, Result};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NudgeConfig {
    /// Directory holding the trigger database and preference files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub notifications: NotifConfig,
}

fn default_data_dir() -> PathBuf {
    NudgeConfig::home_dir()
}

impl Default for NudgeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store: StoreConfig::default(),
            notifications: NotifConfig::default(),
        }
    }
}

impl NudgeConfig {
    /// Load config from the default path (~/.nudge/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NudgeError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| NudgeError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Save config to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| NudgeError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the Nudge home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".nudge")
    }

    /// Full path of the trigger database file.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.store.file_name)
    }
}

/// Trigger store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_file")]
    pub file_name: String,
}

fn default_store_file() -> String {
    "triggers.db".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_name: default_store_file(),
        }
    }
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifConfig {
    /// Serialized notification descriptor applied to triggers that have
    /// no per-trigger override, and restored on a full settings reset.
    #[serde(default = "default_descriptor")]
    pub default_descriptor: String,
}

fn default_descriptor() -> String {
    r#"{"duration":60,"suppression":30,"repeat":[5,10,30]}"#.into()
}

impl NotifConfig {
    /// The factory notification descriptor.
    pub fn default_descriptor() -> String {
        default_descriptor()
    }
}

impl Default for NotifConfig {
    fn default() -> Self {
        Self {
            default_descriptor: default_descriptor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NudgeConfig::default();
        assert_eq!(config.store.file_name, "triggers.db");
        assert!(config.notifications.default_descriptor.contains("duration"));
        assert!(config.store_path().ends_with("triggers.db"));
    }

    #[test]
    fn test_load_from_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[store]\nfile_name = \"custom.db\"\n").unwrap();

        let config = NudgeConfig::load_from(&path).unwrap();
        assert_eq!(config.store.file_name, "custom.db");
        // Untouched sections fall back to defaults
        assert_eq!(
            config.notifications.default_descriptor,
            NotifConfig::default_descriptor()
        );
    }

    #[test]
    fn test_load_from_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not toml {{").unwrap();
        assert!(NudgeConfig::load_from(&path).is_err());
    }
}
