//! Persisted user settings.
//!
//! A single JSON file holds the dark-mode flag under the `darkMode` key. The
//! flag is loaded once at startup and written back on every change.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const DEFAULT_DARK_MODE: bool = true;

#[derive(Debug, Serialize, Deserialize)]
struct StoredSettings {
    #[serde(rename = "darkMode")]
    dark_mode: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    path: PathBuf,
    dark_mode: bool,
}

impl Settings {
    /// Load settings from `path`. A missing or unreadable file yields the
    /// defaults (dark mode enabled); nothing is written until a change is made.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let dark_mode = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<StoredSettings>(&raw) {
                Ok(stored) => stored.dark_mode.unwrap_or(DEFAULT_DARK_MODE),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed settings file");
                    DEFAULT_DARK_MODE
                }
            },
            Err(_) => DEFAULT_DARK_MODE,
        };

        Self { path, dark_mode }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Result<(), AppError> {
        self.dark_mode = enabled;
        self.persist()
    }

    /// Flip the flag and persist it. Returns the new value.
    pub fn toggle_dark_mode(&mut self) -> Result<bool, AppError> {
        self.set_dark_mode(!self.dark_mode)?;
        Ok(self.dark_mode)
    }

    fn persist(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let stored = StoredSettings {
            dark_mode: Some(self.dark_mode),
        };
        let raw = serde_json::to_string_pretty(&stored)
            .map_err(|e| AppError::Internal(format!("Failed to serialize settings: {}", e)))?;
        fs::write(&self.path, raw)?;
        tracing::debug!(path = %self.path.display(), dark_mode = self.dark_mode, "Settings saved");
        Ok(())
    }
}
