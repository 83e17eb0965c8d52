//! File-based preference store — lightweight persistence.
//! Preferences saved as one JSON file; only read on open and written on
//! mutation, never on a hot path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use nudge_core::config::NotifConfig;
use nudge_core::error::{NudgeError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PrefData {
    /// Global notification-format descriptor; `None` means the factory
    /// default from the config.
    #[serde(default)]
    global_notif_desc: Option<String>,
    /// One-shot flag: the maps-screen tooltip was dismissed.
    #[serde(default)]
    maps_tooltip_dismissed: bool,
    /// Free-form per-kind preference payloads, keyed by type string.
    #[serde(default)]
    kind_prefs: BTreeMap<String, serde_json::Value>,
}

/// File-based preference store.
pub struct PreferenceStore {
    path: PathBuf,
    data: PrefData,
}

impl PreferenceStore {
    /// Open the preference store in the given directory, loading
    /// existing state if present. An unreadable file is treated as
    /// empty, not as an error.
    pub fn open(dir: &Path) -> Self {
        std::fs::create_dir_all(dir).ok();
        let path = dir.join("prefs.json");
        let data = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                    tracing::warn!("failed to parse prefs.json: {e}");
                    PrefData::default()
                }),
                Err(e) => {
                    tracing::warn!("failed to read prefs.json: {e}");
                    PrefData::default()
                }
            }
        } else {
            PrefData::default()
        };
        Self { path, data }
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| NudgeError::Config(format!("serialize prefs: {e}")))?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// The global notification descriptor, falling back to the factory
    /// default when never set.
    pub fn global_notif_desc(&self) -> String {
        self.data
            .global_notif_desc
            .clone()
            .unwrap_or_else(NotifConfig::default_descriptor)
    }

    pub fn set_global_notif_desc(&mut self, desc: &str) -> Result<()> {
        self.data.global_notif_desc = Some(desc.to_string());
        self.save()
    }

    pub fn tooltip_dismissed(&self) -> bool {
        self.data.maps_tooltip_dismissed
    }

    pub fn set_tooltip_dismissed(&mut self, dismissed: bool) -> Result<()> {
        self.data.maps_tooltip_dismissed = dismissed;
        self.save()
    }

    /// Per-kind preference payload, if any.
    pub fn kind_pref(&self, trigger_type: &str) -> Option<&serde_json::Value> {
        self.data.kind_prefs.get(trigger_type)
    }

    pub fn set_kind_pref(&mut self, trigger_type: &str, value: serde_json::Value) -> Result<()> {
        self.data
            .kind_prefs
            .insert(trigger_type.to_string(), value);
        self.save()
    }

    /// Wipe everything back to defaults and persist the empty state.
    pub fn clear_all(&mut self) -> Result<()> {
        tracing::info!("clearing all trigger preferences");
        self.data = PrefData::default();
        self.save()
    }
}
